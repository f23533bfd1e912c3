//! Simulated devices shared by the unit tests.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    sync::{
        atomic::{AtomicU64, Ordering::SeqCst},
        Mutex,
    },
};

use crate::{
    drivers::{
        console::Console,
        uart::{UartRegisters, LSR_TX_READY},
    },
    kernel::{
        registry::{Armed, InterruptControl, TrapClass},
        timer::TimerHardware,
    },
};

/// Console that keeps everything written to it.
pub struct RecordingConsole {
    bytes: Mutex<Vec<u8>>,
}

impl RecordingConsole {
    pub const fn new() -> Self {
        Self {
            bytes: Mutex::new(Vec::new()),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_owned).collect()
    }

    pub fn count_lines_containing(&self, needle: &str) -> usize {
        self.lines().iter().filter(|line| line.contains(needle)).count()
    }
}

impl Console for RecordingConsole {
    fn write_bytes(&self, bytes: &[u8]) {
        self.bytes.lock().unwrap().extend_from_slice(bytes);
    }
}

/// 16550 model with a bounded transmit FIFO that drains one byte every
/// `drain_latency` polls of the line-status register. Writing while the FIFO
/// is full loses the byte, the way real hardware does.
pub struct SimulatedUart {
    depth: usize,
    drain_latency: usize,
    countdown: Cell<usize>,
    fifo: RefCell<VecDeque<u8>>,
    wire: RefCell<Vec<u8>>,
    polls: Cell<usize>,
    dropped: Cell<usize>,
}

impl SimulatedUart {
    pub fn new(depth: usize, drain_latency: usize) -> Self {
        assert!(depth > 0 && drain_latency > 0);
        Self {
            depth,
            drain_latency,
            countdown: Cell::new(drain_latency),
            fifo: RefCell::new(VecDeque::new()),
            wire: RefCell::new(Vec::new()),
            polls: Cell::new(0),
            dropped: Cell::new(0),
        }
    }

    pub fn polls(&self) -> usize {
        self.polls.get()
    }

    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }

    /// Everything that made it out, including bytes still queued in the FIFO.
    pub fn drain_all(&self) -> Vec<u8> {
        let mut wire = self.wire.borrow_mut();
        wire.extend(self.fifo.borrow_mut().drain(..));
        wire.clone()
    }

    fn advance(&self) {
        let mut fifo = self.fifo.borrow_mut();
        if fifo.is_empty() {
            return;
        }
        let left = self.countdown.get() - 1;
        if left == 0 {
            let byte = fifo.pop_front().unwrap();
            self.wire.borrow_mut().push(byte);
            self.countdown.set(self.drain_latency);
        } else {
            self.countdown.set(left);
        }
    }
}

impl UartRegisters for SimulatedUart {
    fn line_status(&self) -> u8 {
        self.polls.set(self.polls.get() + 1);
        self.advance();
        if self.fifo.borrow().len() < self.depth {
            LSR_TX_READY
        } else {
            0
        }
    }

    fn write_thr(&self, byte: u8) {
        let mut fifo = self.fifo.borrow_mut();
        if fifo.len() >= self.depth {
            self.dropped.set(self.dropped.get() + 1);
            return;
        }
        if fifo.is_empty() {
            self.countdown.set(self.drain_latency);
        }
        fifo.push_back(byte);
    }
}

/// Kernel objects registered as trap handlers have to outlive the registry.
pub fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}

/// Time source that advances by a fixed step on every read.
pub struct FakeTimer {
    now: AtomicU64,
    step: u64,
    deadlines: Mutex<Vec<u64>>,
}

impl FakeTimer {
    pub fn starting_at(now: u64, step: u64) -> Self {
        Self {
            now: AtomicU64::new(now),
            step,
            deadlines: Mutex::new(Vec::new()),
        }
    }

    pub fn deadlines(&self) -> Vec<u64> {
        self.deadlines.lock().unwrap().clone()
    }
}

impl TimerHardware for FakeTimer {
    fn now(&self) -> u64 {
        // fetch_add wraps on overflow
        self.now.fetch_add(self.step, SeqCst)
    }

    fn set_deadline(&self, deadline: u64) {
        self.deadlines.lock().unwrap().push(deadline);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuEvent {
    InstallVector,
    Unmask(TrapClass),
    EnableInterrupts,
}

/// Records the order of CPU-level interrupt configuration.
pub struct FakeCpu {
    pub events: Vec<CpuEvent>,
    pub vector_sticks: bool,
}

impl FakeCpu {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            vector_sticks: true,
        }
    }
}

impl InterruptControl for FakeCpu {
    fn install_trap_vector(&mut self) {
        self.events.push(CpuEvent::InstallVector);
    }

    fn trap_vector_installed(&self) -> bool {
        self.vector_sticks && self.events.contains(&CpuEvent::InstallVector)
    }

    fn unmask(&mut self, source: Armed) {
        self.events.push(CpuEvent::Unmask(source.class()));
    }

    fn enable_interrupts(&mut self) {
        self.events.push(CpuEvent::EnableInterrupts);
    }
}
