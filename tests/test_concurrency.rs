use nsdebug::{Debugger, MemorySink};
use std::thread;

const THREADS: usize = 8;
const LINES: usize = 200;

#[test]
fn test_concurrent_lines_never_interleave() {
    let sink = MemorySink::new();
    let debugger = Debugger::with_sink("worker:*", Box::new(sink.clone())).expect("valid spec");

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = debugger.debug(format!("worker:{t}"));
            thread::spawn(move || {
                for i in 0..LINES {
                    logger.printf(format_args!("line {i} {}", "x".repeat(64)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    let out = sink.contents();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), THREADS * LINES);

    let payload = "x".repeat(64);
    let mut next = vec![0usize; THREADS];
    for line in &lines {
        let (name, rest) = line
            .trim_start()
            .split_once(" +")
            .unwrap_or_else(|| panic!("malformed line: {line:?}"));
        let (_, body) = rest
            .split_once(": ")
            .unwrap_or_else(|| panic!("malformed line: {line:?}"));
        let worker: usize = name
            .strip_prefix("worker:")
            .and_then(|t| t.parse().ok())
            .unwrap_or_else(|| panic!("unexpected logger name in {line:?}"));

        assert_eq!(body, format!("line {} {payload}", next[worker]));
        next[worker] += 1;
    }
    assert!(next.iter().all(|&n| n == LINES));
}

#[test]
fn test_reparse_while_acquiring_loggers() {
    let debugger = Debugger::with_sink("a", Box::new(MemorySink::new())).expect("valid spec");

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let debugger = debugger.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let table = debugger.table();
                    let source = table.source().to_string();
                    assert!(source == "a" || source == "b");
                    assert_eq!(table.resolve("a"), source == "a");
                    assert_eq!(table.resolve("b"), source == "b");
                }
            })
        })
        .collect();

    for i in 0..200 {
        let spec = if i % 2 == 0 { "b" } else { "a" };
        debugger.reparse(spec).expect("valid spec");
    }

    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
}
