use core6502::{load_image, FlatMemory, MemoryBus, CPU, RESET_VECTOR};
use getopts::Options;
use log::{LevelFilter, Log, Metadata, Record};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1; // Load, argument or execution error.

const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// Writes log records to stderr as `LEVEL message`.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Settings collected from the command line.
struct RunConfig {
    image: String,
    offset: u16,
    start: Option<u16>,
    max_steps: u64,
    nmi_every: Option<u64>,
    irq_every: Option<u64>,
    log_level: LevelFilter,
}

/// Why a run ended without an error.
#[derive(Debug)]
enum StopReason {
    StepLimit,
    Trap(u16),
}

/// Parses a number written as decimal, `0x` hex or `$` hex.
fn parse_number(text: &str) -> Result<u64, String> {
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(hex) = text.strip_prefix('$') {
        u64::from_str_radix(hex, 16)
    } else {
        text.parse::<u64>()
    };
    parsed.map_err(|_| format!("invalid number '{}'", text))
}

fn parse_address(text: &str) -> Result<u16, String> {
    let value = parse_number(text)?;
    u16::try_from(value).map_err(|_| format!("address '{}' is out of range", text))
}

/// Parses a step interval; zero is rejected.
fn parse_interval(text: &str) -> Result<u64, String> {
    match parse_number(text)? {
        0 => Err(format!("interval '{}' must be at least 1", text)),
        n => Ok(n),
    }
}

fn build_options() -> Options {
    let mut opts = Options::new();
    opts.optopt("o", "offset", "load address of the image (default 0x0000)", "ADDR");
    opts.optopt("s", "start", "write ADDR into the reset vector before reset", "ADDR");
    opts.optopt("n", "max-steps", "stop after N steps (default 10000000)", "N");
    opts.optopt("", "nmi-every", "raise an NMI every N steps", "N");
    opts.optopt("", "irq-every", "raise an IRQ every N steps", "N");
    opts.optflag("t", "trace", "log every instruction");
    opts.optflag("v", "verbose", "log resets, loads and interrupts");
    opts.optflag("h", "help", "print this help menu");
    opts
}

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {} [options] IMAGE", program);
    print!("{}", opts.usage(&brief));
}

/// Turns parsed matches into a `RunConfig`.
fn parse_config(matches: &getopts::Matches) -> Result<RunConfig, String> {
    let image = match matches.free.as_slice() {
        [image] => image.clone(),
        [] => return Err("missing IMAGE argument".to_string()),
        _ => return Err("expected exactly one IMAGE argument".to_string()),
    };

    let offset = match matches.opt_str("o") {
        Some(text) => parse_address(&text)?,
        None => 0x0000,
    };
    let start = matches.opt_str("s").map(|t| parse_address(&t)).transpose()?;
    let max_steps = match matches.opt_str("n") {
        Some(text) => parse_number(&text)?,
        None => DEFAULT_MAX_STEPS,
    };
    let nmi_every = matches
        .opt_str("nmi-every")
        .map(|t| parse_interval(&t))
        .transpose()?;
    let irq_every = matches
        .opt_str("irq-every")
        .map(|t| parse_interval(&t))
        .transpose()?;

    let log_level = if matches.opt_present("t") {
        LevelFilter::Trace
    } else if matches.opt_present("v") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    Ok(RunConfig {
        image,
        offset,
        start,
        max_steps,
        nmi_every,
        irq_every,
        log_level,
    })
}

/// Steps the CPU until the step limit, a trap, or an execution error.
fn run(cpu: &mut CPU<FlatMemory>, config: &RunConfig) -> Result<StopReason, core6502::ExecutionError> {
    for step in 1..=config.max_steps {
        let pc_before = cpu.pc();
        let interrupt_due = cpu.nmi_pending() || (cpu.irq_pending() && !cpu.flag_i());

        cpu.step()?;

        if !interrupt_due && cpu.pc() == pc_before {
            return Ok(StopReason::Trap(pc_before));
        }

        if config.nmi_every.is_some_and(|n| step % n == 0) {
            cpu.trigger_nmi();
        }
        if config.irq_every.is_some_and(|n| step % n == 0) {
            cpu.trigger_irq();
        }
    }

    Ok(StopReason::StepLimit)
}

fn print_state(cpu: &CPU<FlatMemory>) {
    println!(
        "PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} P:{:02X} CYC:{}",
        cpu.pc(),
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        cpu.status(),
        cpu.cycles()
    );
}

/// Parses arguments, loads the image and runs it. Returns the exit code.
fn init() -> u8 {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("run6502");
    let opts = build_options();

    let matches = match opts.parse(args.iter().skip(1)) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            print_usage(program, &opts);
            return EXIT_FAILURE;
        }
    };

    if matches.opt_present("h") {
        print_usage(program, &opts);
        return EXIT_SUCCESS;
    }

    let config = match parse_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            print_usage(program, &opts);
            return EXIT_FAILURE;
        }
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(config.log_level);
    }

    let mut memory = FlatMemory::new();
    if let Err(e) = load_image(&mut memory, &config.image, config.offset) {
        eprintln!("{}", e);
        return EXIT_FAILURE;
    }

    if let Some(start) = config.start {
        memory.write(RESET_VECTOR, start as u8);
        memory.write(RESET_VECTOR.wrapping_add(1), (start >> 8) as u8);
    }

    let mut cpu = CPU::new(memory);
    let exit_code = match run(&mut cpu, &config) {
        Ok(StopReason::StepLimit) => {
            log::info!("step limit of {} reached", config.max_steps);
            EXIT_SUCCESS
        }
        Ok(StopReason::Trap(pc)) => {
            log::info!("trapped at ${:04X}", pc);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            EXIT_FAILURE
        }
    };

    log::debug!("stopped after {} cycles", cpu.cycles());
    print_state(&cpu);
    exit_code
}

fn main() {
    // POSIX exit codes are 8 bits wide; init returns one.
    let exit_code = init() as i32;
    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(max_steps: u64) -> RunConfig {
        RunConfig {
            image: String::new(),
            offset: 0,
            start: None,
            max_steps,
            nmi_every: None,
            irq_every: None,
            log_level: LevelFilter::Off,
        }
    }

    fn cpu_with_program(program: &[u8]) -> CPU<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.write(0xFFFC, 0x00);
        memory.write(0xFFFD, 0x80);
        core6502::load_bytes(&mut memory, program, 0x8000).unwrap();
        CPU::new(memory)
    }

    #[test]
    fn test_parse_number_formats() {
        assert_eq!(parse_number("1234"), Ok(1234));
        assert_eq!(parse_number("0x8000"), Ok(0x8000));
        assert_eq!(parse_number("$C000"), Ok(0xC000));
        assert!(parse_number("zz").is_err());
    }

    #[test]
    fn test_parse_address_range() {
        assert_eq!(parse_address("$FFFF"), Ok(0xFFFF));
        assert!(parse_address("0x10000").is_err());
    }

    #[test]
    fn test_parse_interval_rejects_zero() {
        assert!(parse_interval("0").is_err());
        assert_eq!(parse_interval("3"), Ok(3));
    }

    #[test]
    fn test_parse_config_defaults() {
        let opts = build_options();
        let matches = opts.parse(["prog.bin"]).unwrap();
        let config = parse_config(&matches).unwrap();

        assert_eq!(config.image, "prog.bin");
        assert_eq!(config.offset, 0);
        assert_eq!(config.start, None);
        assert_eq!(config.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_parse_config_flags() {
        let opts = build_options();
        let matches = opts
            .parse(["-o", "$0400", "-s", "0x0400", "-n", "50", "--irq-every", "10", "-v", "a.bin"])
            .unwrap();
        let config = parse_config(&matches).unwrap();

        assert_eq!(config.offset, 0x0400);
        assert_eq!(config.start, Some(0x0400));
        assert_eq!(config.max_steps, 50);
        assert_eq!(config.irq_every, Some(10));
        assert_eq!(config.nmi_every, None);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_parse_config_requires_image() {
        let opts = build_options();
        let matches = opts.parse(Vec::<String>::new()).unwrap();
        assert!(parse_config(&matches).is_err());
    }

    #[test]
    fn test_run_stops_on_jump_to_self() {
        // LDA #$01 ; JMP $8002
        let mut cpu = cpu_with_program(&[0xA9, 0x01, 0x4C, 0x02, 0x80]);

        let reason = run(&mut cpu, &config_for(100)).unwrap();

        assert!(matches!(reason, StopReason::Trap(0x8002)));
        assert_eq!(cpu.a(), 0x01);
    }

    #[test]
    fn test_run_stops_at_step_limit() {
        let mut cpu = cpu_with_program(&[0xEA; 16]);

        let reason = run(&mut cpu, &config_for(5)).unwrap();

        assert!(matches!(reason, StopReason::StepLimit));
        assert_eq!(cpu.pc(), 0x8005);
    }

    #[test]
    fn test_run_reports_undefined_opcode() {
        let mut cpu = cpu_with_program(&[0xEA, 0x02]);
        assert!(run(&mut cpu, &config_for(100)).is_err());
        assert_eq!(cpu.pc(), 0x8001);
    }

    #[test]
    fn test_run_raises_periodic_nmi() {
        let mut cpu = cpu_with_program(&[0xEA; 16]);
        cpu.memory_mut().write(0xFFFA, 0x00);
        cpu.memory_mut().write(0xFFFB, 0x90);
        cpu.memory_mut().write(0x9000, 0xEA);

        let mut config = config_for(3);
        config.nmi_every = Some(2);

        run(&mut cpu, &config).unwrap();

        // Two NOPs, then the NMI service step
        assert_eq!(cpu.pc(), 0x9000);
        assert_eq!(cpu.cycles(), 2 + 2 + 7);
    }
}
