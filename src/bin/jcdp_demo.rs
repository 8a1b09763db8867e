use std::env;
use std::error::Error;
use std::sync::Arc;
use std::thread;

use jcdp::{FilePrinter, Printer, PrinterConfig, TerminalPrinter, WriterRegistry};
use tracing_subscriber::EnvFilter;

fn print_usage_and_exit() -> ! {
    eprintln!("Usage:");
    eprintln!("  jcdp_demo <log-file> [threads]");
    eprintln!("  jcdp_demo --config <config.json> [threads]");
    std::process::exit(1);
}

fn parse_config(args: &mut impl Iterator<Item = String>) -> Result<PrinterConfig, Box<dyn Error>> {
    let first = match args.next() {
        Some(arg) => arg,
        None => return Err("missing arguments".into()),
    };

    if first == "--config" {
        let path = match args.next() {
            Some(p) => p,
            None => return Err("--config requires a path".into()),
        };
        return Ok(PrinterConfig::load(path)?);
    }

    Ok(PrinterConfig::new()
        .with_path(first)
        .with_level(2)
        .with_timestamp(true))
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let config = parse_config(&mut args)?;
    let threads: usize = match args.next() {
        Some(n) => n.parse()?,
        None => 4,
    };

    let registry = Arc::new(WriterRegistry::new());
    let _guard = registry.shutdown_guard();

    let mut workers = Vec::with_capacity(threads);
    for id in 0..threads {
        // Each worker builds its own printer; they all share one file handle.
        let printer = FilePrinter::from_config(&config, registry.clone())?;
        workers.push(thread::spawn(move || {
            printer.println(format_args!("worker {id} started"));
            printer.debug_println_at(format_args!("worker {id} detail"), 2);
            printer.debug_println_at(format_args!("worker {id} noise"), 3);
        }));
    }
    for worker in workers {
        worker.join().map_err(|_| "worker thread panicked")?;
    }

    let terminal = TerminalPrinter::from_config(&config)?;
    for path in registry.paths() {
        terminal.println(format_args!("wrote {threads} workers to {}", path.display()));
    }

    Ok(())
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("jcdp_demo error: {e}");
        print_usage_and_exit();
    }
}
