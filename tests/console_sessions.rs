//! End-to-end console sessions over in-memory input and output

use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use queue_desk::balancer::BalanceStrategy;
use queue_desk::session::QueueSession;
use queue_desk::shell::{
    Console, QueueShell, ReportFormat, RosterShell, Shell, TrolleyShell, WarehouseShell,
};
use queue_desk::warehouse::{Warehouse, WarehouseLayout};
use queue_desk::workload;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::Level;

fn run_with(console: Console, shell: &mut dyn Shell, input: &str) -> String {
    let mut out = Vec::new();
    console.run(shell, input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn run(shell: &mut dyn Shell, input: &str) -> String {
    run_with(Console::new().with_prompts(false), shell, input)
}

#[test]
fn test_queue_with_prompts() {
    let out = run_with(
        Console::new(),
        &mut QueueShell::new(),
        "1\nENQUEUE 3\nDISTRIBUTE\n",
    );
    assert_eq!(
        out,
        "Enter the number of windows\n<<< <<< T001\n<<< Window 1 (3 min): T001\n"
    );
}

#[test]
fn test_queue_equal_durations_spread_left_to_right() {
    let out = run(&mut QueueShell::new(), "2\nENQUEUE 5\nENQUEUE 5\nDISTRIBUTE\n");
    assert_eq!(
        out,
        "T001\nT002\nWindow 1 (5 min): T001\nWindow 2 (5 min): T002\n"
    );
}

#[test]
fn test_queue_strategies_print_the_same() {
    let input = "3\nENQUEUE 7\nENQUEUE 2\nENQUEUE 2\nENQUEUE 9\nENQUEUE 1\nENQUEUE 4\nDISTRIBUTE\n";
    let linear = run(
        &mut QueueShell::new().with_strategy(BalanceStrategy::Linear),
        input,
    );
    let heap = run(
        &mut QueueShell::new().with_strategy(BalanceStrategy::Heap),
        input,
    );
    assert_eq!(linear, heap);
    assert_eq!(
        linear,
        "T001\nT002\nT003\nT004\nT005\nT006\n\
         Window 1 (7 min): T001\n\
         Window 2 (11 min): T002, T004\n\
         Window 3 (7 min): T003, T005, T006\n"
    );
}

#[test]
fn test_queue_interleaved_errors() {
    let out = run(
        &mut QueueShell::new(),
        "\n  2  \nENQUEUE 0\nPING\nENQUEUE 4\n\nENQUEUE x\nENQUEUE 6\nDISTRIBUTE\n",
    );
    assert_eq!(
        out,
        "error: duration must be a positive integer, got `0`\n\
         error: unknown command `PING`\n\
         T001\n\
         error: duration must be a positive integer, got `x`\n\
         T002\n\
         Window 1 (4 min): T001\n\
         Window 2 (6 min): T002\n"
    );
}

#[test]
fn test_simulated_workload_json() {
    let mut session = QueueSession::new();
    let mut rng = SmallRng::seed_from_u64(7);
    let tickets = workload::random_visitors(&mut session, 25, 15, &mut rng).unwrap();
    assert_eq!(tickets.len(), 25);

    let mut shell = QueueShell::new()
        .with_session(session)
        .with_windows(NonZeroUsize::new(4).unwrap())
        .with_format(ReportFormat::Json);
    let mut out = Vec::new();
    Console::new()
        .with_prompts(false)
        .run(&mut shell, std::io::empty(), &mut out)
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let windows = value["windows"].as_array().unwrap();
    assert_eq!(windows.len(), 4);
    let assigned: usize = windows
        .iter()
        .map(|w| w["visitors"].as_array().unwrap().len())
        .sum();
    assert_eq!(assigned, 25);
    assert_eq!(value["kpi"]["visitor_count"], 25);
}

#[test]
fn test_warehouse_custom_layout() {
    let layout = WarehouseLayout {
        zones: 2,
        shelves_per_zone: 1,
        sections_per_shelf: 1,
        tiers_per_section: 2,
        cell_capacity: 5,
    };
    let mut shell = WarehouseShell::new(Warehouse::new(layout).unwrap());
    let out = run(&mut shell, "ADD bolts 5 B0112\nADD nuts 1 A0113\nINFO\nEXIT\n");
    assert_eq!(
        out,
        "Added 5 units of bolts to B0112\n\
         Error: invalid address: A0113\n\
         Warehouse info:\n\
         Total fill: 25.0%\n\
         Zone A fill: 0.0%\n\
         Zone B fill: 50.0%\n\
         \n\
         Occupied cells:\n\
         B0112: bolts (5)\n\
         \n\
         Empty cells: 3\n"
    );
    assert_eq!(shell.warehouse().used_capacity(), 5);
}

#[test]
fn test_trolley_transfers() {
    let mut shell = TrolleyShell::new();
    let out = run(
        &mut shell,
        "CREATE_TRL east Mill Square Bridge\n\
         CREATE_TRL west Bridge Square\n\
         CREATE_TRL loop Square\n\
         STOPS_IN_TRL east\n\
         TRL_IN_STOP Square\n",
    );
    assert_eq!(
        out,
        "Stop Mill: 0\n\
         Stop Square: west loop\n\
         Stop Bridge: west\n\
         Square: east west loop\n"
    );
    assert!(shell.registry().has_stop("Mill"));
}

#[test]
fn test_roster_expulsion_drops_statuses() {
    let mut shell = RosterShell::new();
    let out = run(
        &mut shell,
        "5\nNEW_STUDENTS 3\nSUSPICIOUS 3\nNEW_STUDENTS -1\nSCOUNT\nSUSPICIOUS 3\n",
    );
    assert_eq!(
        out,
        "Welcome 3 clever students!\n\
         The suspected student 3\n\
         GoodBye 1 clever students!\n\
         List of students for expulsion consists of 0 students\n\
         Incorrect\n"
    );
    assert_eq!(shell.roster().enrolled(), 2);
}

/// Collects formatted log lines written by a test subscriber.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Runs `f` with warnings and errors captured into the returned buffer.
fn capture_warnings(f: impl FnOnce()) -> String {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

#[test]
fn test_recovered_typos_stay_below_warn() {
    let logs = capture_warnings(|| {
        run(&mut QueueShell::new(), "x\n2\nENQUEUE y\nHELLO\nENQUEUE 3\nDISTRIBUTE\n");
        run(&mut RosterShell::new(), "z\n1\nSUSPICIOUS 4\n");
        run(&mut TrolleyShell::new(), "CREATE_TRL a S\nCREATE_TRL a T\n");
        let mut warehouse =
            WarehouseShell::new(Warehouse::new(WarehouseLayout::default()).unwrap());
        run(&mut warehouse, "ADD a 1 Q0000\nREMOVE a 1 A0111\n");
    });
    assert_eq!(logs, "");
}

#[test]
fn test_input_ending_without_window_count_warns() {
    let logs = capture_warnings(|| {
        run(&mut QueueShell::new(), "oops\n");
    });
    assert!(logs.contains("input ended before a window count was given"));
}
