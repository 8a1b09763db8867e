//! Tests for FilePrinter output, gating and sharing.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use chrono::Local;

use crate::{
    DateFormat, FilePrinter, LINE_SEPARATOR, Printer, PrinterConfig, PrinterError, WriterRegistry,
};

/// Current local time in `fmt`, read before and after `action`, so a
/// clock rolling over mid-test still matches one of the two.
fn clock_around<T>(fmt: &str, action: impl FnOnce() -> T) -> (String, String, T) {
    let before = Local::now().format(fmt).to_string();
    let out = action();
    let after = Local::now().format(fmt).to_string();
    (before, after, out)
}

fn printer(registry: &Arc<WriterRegistry>, path: &Path, level: i32, ts: bool) -> FilePrinter {
    FilePrinter::builder(path, level, ts)
        .with_registry(Arc::clone(registry))
        .build()
        .unwrap()
}

#[test]
fn hello_then_timestamped_world() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let plain = printer(&registry, &path, 0, false);
    plain.println("hello");
    plain.flush().unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("hello"));

    let stamped = FilePrinter::builder(&path, 0, true)
        .with_format(DateFormat::pattern("yyyy-MM-dd").unwrap())
        .with_registry(Arc::clone(&registry))
        .build()
        .unwrap();
    let (before, after, ()) = clock_around("%Y-%m-%d", || {
        stamped.println("world");
        stamped.flush().unwrap();
    });

    let contents = fs::read_to_string(&path).unwrap();
    let last = contents.lines().last().unwrap();
    assert!(
        last == format!("{before} world") || last == format!("{after} world"),
        "unexpected line: {last}"
    );
}

#[test]
fn printers_on_same_path_share_writer_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let a = printer(&registry, &path, 0, false);
    let b = printer(&registry, &path, 0, false);
    assert!(Arc::ptr_eq(a.writer(), b.writer()));

    a.print("one ");
    b.print("two ");
    a.println("three");
    b.flush().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("one two three{LINE_SEPARATOR}")
    );
}

#[test]
fn debug_output_requires_positive_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let quiet = printer(&registry, &path, 0, false);
    assert!(!quiet.is_logging_debug());
    quiet.debug_print("no");
    quiet.debug_println("no");
    quiet.debug_print_at("no", 0);
    quiet.debug_println_at("no", 0);
    quiet.flush().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    let chatty = printer(&registry, &path, 1, false);
    chatty.debug_println("yes");
    chatty.flush().unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("yes{LINE_SEPARATOR}")
    );
}

#[test]
fn leveled_debug_respects_maximum_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let p = printer(&registry, &path, 2, false);
    assert!(p.can_print(1));
    assert!(p.can_print(2));
    assert!(!p.can_print(3));

    p.debug_println_at("coarse", 1);
    p.debug_println_at("fine", 2);
    p.debug_println_at("too fine", 3);
    p.debug_print_at("inline", 2);
    p.flush().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("[ 1 ] coarse{LINE_SEPARATOR}[ 2 ] fine{LINE_SEPARATOR}[ 2 ] inline")
    );
}

#[test]
fn leveled_debug_with_timestamp_puts_timestamp_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let p = FilePrinter::builder(&path, 3, true)
        .with_format(DateFormat::pattern("yyyy").unwrap())
        .with_registry(registry)
        .build()
        .unwrap();
    let (before, after, ()) = clock_around("%Y", || {
        p.debug_println_at("msg", 3);
        p.flush().unwrap();
    });

    let contents = fs::read_to_string(&path).unwrap();
    assert!(
        [before, after]
            .iter()
            .any(|year| contents == format!("{year} [ 3 ] msg{LINE_SEPARATOR}")),
        "unexpected contents: {contents:?}"
    );
}

#[test]
fn printer_keeps_temporary_registry_alive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");

    // Nothing else holds this registry once `build` returns.
    let p = FilePrinter::builder(&path, 0, false)
        .with_registry(Arc::new(WriterRegistry::new()))
        .build()
        .unwrap();
    assert!(p.writer().is_open());
    assert_eq!(Arc::strong_count(p.registry()), 1);

    p.println("kept");
    p.flush().unwrap();

    let config = PrinterConfig::new().with_path(&path);
    let from_config = FilePrinter::from_config(&config, Arc::new(WriterRegistry::new())).unwrap();
    from_config.println("also kept");
    from_config.flush().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("kept{LINE_SEPARATOR}also kept{LINE_SEPARATOR}")
    );
}

#[test]
fn error_variants_go_to_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let p = printer(&registry, &path, 0, false);
    p.error_print("bad ");
    p.error_println("news");
    p.flush().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("bad news{LINE_SEPARATOR}")
    );
}

#[test]
fn print_timestamp_writes_date_and_space() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let mut p = printer(&registry, &path, 0, false);
    p.set_date_format(DateFormat::pattern("yyyy-MM-dd").unwrap());
    let (before, after, ()) = clock_around("%Y-%m-%d", || {
        p.print_timestamp();
        p.print_error_timestamp();
        p.flush().unwrap();
    });

    let contents = fs::read_to_string(&path).unwrap();
    let allowed = [
        format!("{before} {before} "),
        format!("{before} {after} "),
        format!("{after} {after} "),
    ];
    assert!(allowed.contains(&contents), "unexpected contents: {contents:?}");
}

#[test]
fn setters_change_behavior() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let mut p = printer(&registry, &path, 0, false);
    p.set_level(5);
    p.set_timestamping(true);
    p.set_date_format(DateFormat::strftime("%Y").unwrap());

    assert_eq!(p.level(), 5);
    assert!(p.is_logging_timestamps());
    assert_eq!(p.date_format().as_strftime(), "%Y");
    let (before, after, formatted) = clock_around("%Y", || p.date_formatted());
    assert!(formatted == before || formatted == after, "got {formatted}");
}

#[test]
fn display_describes_printer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let p = printer(&registry, &path, 3, true);
    let text = p.to_string();

    assert!(text.starts_with("FilePrinter | level: 3 | timestamping: true | "));
    assert!(text.ends_with("log.txt"));
    assert!(p.path().is_absolute());
}

#[test]
fn writes_after_shutdown_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let p = printer(&registry, &path, 0, false);
    p.println("before");
    registry.shutdown();
    p.println("after");
    p.flush().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("before{LINE_SEPARATOR}")
    );
}

#[test]
fn concurrent_printers_write_whole_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let workers: Vec<_> = (0..8)
        .map(|t| {
            let p = printer(&registry, &path, 1, true);
            thread::spawn(move || {
                for n in 0..100 {
                    p.debug_println_at(format_args!("worker {t} message {n}"), 1);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    registry.shutdown();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 800);
    for l in lines {
        // "yyyy-MM-dd HH:mm:ss [ 1 ] worker T message N"
        assert_eq!(&l[19..26], " [ 1 ] ", "malformed line: {l}");
        assert!(l[26..].starts_with("worker "));
    }
}

#[test]
fn builder_reports_open_errors() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(WriterRegistry::new());

    let err = FilePrinter::builder(dir.path().join("no/such/dir/log.txt"), 0, false)
        .with_registry(registry)
        .build()
        .expect_err("directory does not exist");

    assert!(matches!(err, PrinterError::Open { .. }));
}

#[test]
fn from_config_builds_configured_printer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let registry = Arc::new(WriterRegistry::new());

    let config = PrinterConfig::new()
        .with_path(&path)
        .with_level(2)
        .with_timestamp(true)
        .with_date_format("yyyy");
    let p = FilePrinter::from_config(&config, registry).unwrap();

    assert_eq!(p.level(), 2);
    assert!(p.is_logging_timestamps());
    assert_eq!(p.date_format().source(), "yyyy");
}

#[test]
fn from_config_requires_path() {
    let registry = Arc::new(WriterRegistry::new());
    let err = FilePrinter::from_config(&PrinterConfig::new(), registry).unwrap_err();
    assert!(matches!(err, PrinterError::MissingPath));
}

#[test]
fn from_config_rejects_bad_date_format() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(WriterRegistry::new());

    let config = PrinterConfig::new()
        .with_path(dir.path().join("log.txt"))
        .with_date_format("yyyy QQ");
    let err = FilePrinter::from_config(&config, Arc::clone(&registry)).unwrap_err();

    assert!(matches!(err, PrinterError::InvalidDateFormat { .. }));
    assert!(registry.is_empty());
}
