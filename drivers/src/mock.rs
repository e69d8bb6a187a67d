//! Host-side fakes of every HAL trait.
//!
//! Each fake is a cheap handle onto shared state: hand one clone to the code
//! under test and keep another to inject input and inspect register
//! traffic. Only built for tests and with the `mock` feature.

extern crate std;

use core::fmt;
use std::collections::{BTreeMap, VecDeque};
use std::string::String;
use std::sync::{Arc, Mutex, MutexGuard};
use std::vec::Vec;

use crate::hal::display::{DisplayError, SegmentDisplay};
use crate::hal::gpio::{Channel, GpioError, GpioInterrupts, GpioPort};
use crate::hal::i2c::{AddressType, I2cController, I2cError, I2cEvents, check_address};
use crate::hal::interrupt::{IntcError, InterruptController, StartMode, VectorId, check_vector};
use crate::hal::serial::{
    InterruptSerial, NonBlockingSerial, SerialError, SerialPort, UartStatus,
};
use crate::hal::timer::CountingTimer;
use crate::platform::{DeviceId, DeviceKind, Platform, PlatformError};

fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn index(channel: Channel) -> usize {
    match channel {
        Channel::One => 0,
        Channel::Two => 1,
    }
}

// ============================================================================
// GPIO
// ============================================================================

/// One call made on a [`MockGpio`], in order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GpioOp {
    SetDirection(Channel, u32),
    Write(Channel, u32),
    Read(Channel),
    EnableInterrupt(Channel),
    DisableInterrupt(Channel),
    ClearInterrupt(Channel),
    EnableGlobalInterrupt,
}

#[derive(Debug, Default)]
struct GpioState {
    dual: bool,
    interrupts: bool,
    direction: [u32; 2],
    output: [u32; 2],
    input: [u32; 2],
    ier: u32,
    gier: bool,
    isr: u32,
    ops: Vec<GpioOp>,
}

/// Fake GPIO port. Input lines read the injected level, output lines read
/// back what was written.
#[derive(Debug, Clone)]
pub struct MockGpio(Arc<Mutex<GpioState>>);

impl MockGpio {
    /// Single-channel port with interrupt support.
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(GpioState {
            interrupts: true,
            ..GpioState::default()
        })))
    }

    /// Single-channel port without interrupt support.
    pub fn output_only() -> Self {
        Self(Arc::new(Mutex::new(GpioState::default())))
    }

    pub fn dual(self) -> Self {
        lock(&self.0).dual = true;
        self
    }

    fn check(&self, state: &GpioState, channel: Channel) -> Result<(), GpioError> {
        match channel {
            Channel::Two if !state.dual => Err(GpioError::InvalidChannel),
            _ => Ok(()),
        }
    }

    fn interrupt_op(
        &mut self,
        channel: Channel,
        op: GpioOp,
        apply: impl FnOnce(&mut GpioState, u32),
    ) -> Result<(), GpioError> {
        let mut state = lock(&self.0);
        if !state.interrupts {
            return Err(GpioError::NoInterrupts);
        }
        self.check(&state, channel)?;
        state.ops.push(op);
        apply(&mut state, channel.mask());
        Ok(())
    }

    /// Drive the input lines of `channel`.
    pub fn set_input(&self, channel: Channel, value: u32) {
        lock(&self.0).input[index(channel)] = value;
    }

    /// Latch an input-change interrupt on `channel`.
    pub fn raise_interrupt(&self, channel: Channel) {
        lock(&self.0).isr |= channel.mask();
    }

    pub fn ops(&self) -> Vec<GpioOp> {
        lock(&self.0).ops.clone()
    }

    pub fn clear_ops(&self) {
        lock(&self.0).ops.clear();
    }

    /// Values written to `channel`, oldest first.
    pub fn writes(&self, channel: Channel) -> Vec<u32> {
        lock(&self.0)
            .ops
            .iter()
            .filter_map(|op| match *op {
                GpioOp::Write(ch, value) if ch == channel => Some(value),
                _ => None,
            })
            .collect()
    }

    pub fn direction(&self, channel: Channel) -> u32 {
        lock(&self.0).direction[index(channel)]
    }

    pub fn output(&self, channel: Channel) -> u32 {
        lock(&self.0).output[index(channel)]
    }

    pub fn interrupt_enabled(&self, channel: Channel) -> bool {
        lock(&self.0).ier & channel.mask() != 0
    }

    pub fn global_interrupt_enabled(&self) -> bool {
        lock(&self.0).gier
    }

    pub fn interrupt_latched(&self, channel: Channel) -> bool {
        lock(&self.0).isr & channel.mask() != 0
    }
}

impl Default for MockGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioPort for MockGpio {
    type Error = GpioError;

    fn set_direction(&mut self, channel: Channel, input_mask: u32) -> Result<(), GpioError> {
        let mut state = lock(&self.0);
        self.check(&state, channel)?;
        state.ops.push(GpioOp::SetDirection(channel, input_mask));
        state.direction[index(channel)] = input_mask;
        Ok(())
    }

    fn write(&mut self, channel: Channel, value: u32) -> Result<(), GpioError> {
        let mut state = lock(&self.0);
        self.check(&state, channel)?;
        state.ops.push(GpioOp::Write(channel, value));
        state.output[index(channel)] = value;
        Ok(())
    }

    fn read(&self, channel: Channel) -> Result<u32, GpioError> {
        let mut state = lock(&self.0);
        self.check(&state, channel)?;
        state.ops.push(GpioOp::Read(channel));
        let i = index(channel);
        let inputs = state.direction[i];
        Ok((state.input[i] & inputs) | (state.output[i] & !inputs))
    }
}

impl GpioInterrupts for MockGpio {
    fn enable_interrupt(&mut self, channel: Channel) -> Result<(), GpioError> {
        self.interrupt_op(channel, GpioOp::EnableInterrupt(channel), |s, m| s.ier |= m)
    }

    fn disable_interrupt(&mut self, channel: Channel) -> Result<(), GpioError> {
        self.interrupt_op(channel, GpioOp::DisableInterrupt(channel), |s, m| {
            s.ier &= !m
        })
    }

    fn clear_interrupt(&mut self, channel: Channel) -> Result<(), GpioError> {
        self.interrupt_op(channel, GpioOp::ClearInterrupt(channel), |s, m| {
            s.isr &= !m
        })
    }

    fn enable_global_interrupt(&mut self) -> Result<(), GpioError> {
        let mut state = lock(&self.0);
        if !state.interrupts {
            return Err(GpioError::NoInterrupts);
        }
        state.ops.push(GpioOp::EnableGlobalInterrupt);
        state.gier = true;
        Ok(())
    }

    fn interrupt_status(&self) -> u32 {
        lock(&self.0).isr
    }
}

// ============================================================================
// UART
// ============================================================================

#[derive(Debug, Default)]
struct UartState {
    initialized: bool,
    interrupt_enabled: bool,
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    tx_capacity: Option<usize>,
}

impl UartState {
    fn tx_full(&self) -> bool {
        self.tx_capacity.is_some_and(|cap| self.tx.len() >= cap)
    }
}

/// Fake UART. The receive FIFO is fed with [`MockUart::receive`]; the
/// transmit side keeps everything written (up to an optional capacity).
#[derive(Debug, Clone, Default)]
pub struct MockUart(Arc<Mutex<UartState>>);

impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes in the receive FIFO.
    pub fn receive(&self, bytes: &[u8]) {
        lock(&self.0).rx.extend(bytes.iter().copied());
    }

    /// Transmit FIFO reports full once `capacity` bytes were sent.
    pub fn set_tx_capacity(&self, capacity: usize) {
        lock(&self.0).tx_capacity = Some(capacity);
    }

    pub fn transmitted(&self) -> Vec<u8> {
        lock(&self.0).tx.clone()
    }

    pub fn transmitted_str(&self) -> String {
        String::from_utf8_lossy(&lock(&self.0).tx).into_owned()
    }

    pub fn pending_rx(&self) -> usize {
        lock(&self.0).rx.len()
    }

    pub fn is_initialized(&self) -> bool {
        lock(&self.0).initialized
    }

    pub fn interrupt_enabled(&self) -> bool {
        lock(&self.0).interrupt_enabled
    }
}

impl SerialPort for MockUart {
    type Error = SerialError;

    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        self.try_write_byte(byte)
    }

    /// Never blocks: an empty FIFO reports `WouldBlock`.
    fn read_byte(&mut self) -> Result<u8, SerialError> {
        self.try_read_byte()
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        Ok(())
    }

    fn is_busy(&self) -> bool {
        false
    }
}

impl NonBlockingSerial for MockUart {
    fn try_write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        let mut state = lock(&self.0);
        if state.tx_full() {
            return Err(SerialError::WouldBlock);
        }
        state.tx.push(byte);
        Ok(())
    }

    fn try_read_byte(&mut self) -> Result<u8, SerialError> {
        lock(&self.0).rx.pop_front().ok_or(SerialError::WouldBlock)
    }
}

impl InterruptSerial for MockUart {
    fn enable_interrupt(&mut self) -> Result<(), SerialError> {
        lock(&self.0).interrupt_enabled = true;
        Ok(())
    }

    fn disable_interrupt(&mut self) -> Result<(), SerialError> {
        lock(&self.0).interrupt_enabled = false;
        Ok(())
    }

    fn status(&self) -> UartStatus {
        let state = lock(&self.0);
        let mut status = UartStatus::empty();
        status.set(UartStatus::RX_VALID, !state.rx.is_empty());
        status.set(UartStatus::TX_FULL, state.tx_full());
        status.set(UartStatus::TX_EMPTY, !state.tx_full());
        status.set(UartStatus::INTR_ENABLED, state.interrupt_enabled);
        status
    }

    fn read_rx(&mut self) -> u8 {
        lock(&self.0).rx.pop_front().unwrap_or(0)
    }

    fn write_tx(&mut self, byte: u8) {
        let mut state = lock(&self.0);
        // a full transmitter drops the byte
        if !state.tx_full() {
            state.tx.push(byte);
        }
    }
}

// ============================================================================
// Interrupt controller
// ============================================================================

/// One call made on a [`MockIntc`], in order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntcOp {
    Enable(VectorId),
    Start(StartMode),
    Acknowledge(VectorId),
}

#[derive(Debug, Default)]
struct IntcState {
    enabled: u32,
    raised: u32,
    started: Option<StartMode>,
    ops: Vec<IntcOp>,
}

/// Fake interrupt controller. Lines are raised by the test; acknowledging
/// drops the request.
#[derive(Debug, Clone, Default)]
pub struct MockIntc(Arc<Mutex<IntcState>>);

impl MockIntc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self, vector: VectorId) {
        lock(&self.0).raised |= 1 << vector;
    }

    pub fn is_enabled(&self, vector: VectorId) -> bool {
        lock(&self.0).enabled & (1 << vector) != 0
    }

    pub fn started(&self) -> Option<StartMode> {
        lock(&self.0).started
    }

    pub fn ops(&self) -> Vec<IntcOp> {
        lock(&self.0).ops.clone()
    }

    pub fn acknowledged(&self) -> Vec<VectorId> {
        lock(&self.0)
            .ops
            .iter()
            .filter_map(|op| match *op {
                IntcOp::Acknowledge(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    fn reset(&self) {
        let mut state = lock(&self.0);
        state.enabled = 0;
        state.started = None;
    }
}

impl InterruptController for MockIntc {
    type Error = IntcError;

    fn enable(&mut self, vector: VectorId) -> Result<(), IntcError> {
        let mask = check_vector(vector)?;
        let mut state = lock(&self.0);
        state.ops.push(IntcOp::Enable(vector));
        state.enabled |= mask;
        Ok(())
    }

    fn start(&mut self, mode: StartMode) -> Result<(), IntcError> {
        let mut state = lock(&self.0);
        if state.started.is_some() {
            return Err(IntcError::AlreadyStarted);
        }
        state.ops.push(IntcOp::Start(mode));
        state.started = Some(mode);
        Ok(())
    }

    fn active(&self) -> u32 {
        let state = lock(&self.0);
        state.raised & state.enabled
    }

    fn acknowledge(&mut self, vector: VectorId) -> Result<(), IntcError> {
        let mask = check_vector(vector)?;
        let mut state = lock(&self.0);
        state.ops.push(IntcOp::Acknowledge(vector));
        state.raised &= !mask;
        Ok(())
    }
}

// ============================================================================
// IIC
// ============================================================================

#[derive(Debug, Default)]
struct IicState {
    fail_reset: bool,
    target: Option<u8>,
    own: Option<u8>,
    latched: I2cEvents,
}

#[derive(Debug, Clone, Default)]
pub struct MockIic(Arc<Mutex<IicState>>);

impl MockIic {
    pub fn new() -> Self {
        Self::default()
    }

    /// A controller that never comes out of reset.
    pub fn broken() -> Self {
        let iic = Self::default();
        lock(&iic.0).fail_reset = true;
        iic
    }

    pub fn latch(&self, events: I2cEvents) {
        lock(&self.0).latched |= events;
    }

    pub fn own_address(&self) -> Option<u8> {
        lock(&self.0).own
    }
}

impl I2cController for MockIic {
    type Error = I2cError;

    fn set_address(&mut self, kind: AddressType, address: u16) -> Result<(), I2cError> {
        let address = check_address(address)?;
        let mut state = lock(&self.0);
        match kind {
            AddressType::Send => state.target = Some(address),
            AddressType::Respond => state.own = Some(address),
        }
        Ok(())
    }

    fn target_address(&self) -> Option<u16> {
        lock(&self.0).target.map(u16::from)
    }

    fn service_interrupt(&mut self) -> I2cEvents {
        core::mem::take(&mut lock(&self.0).latched)
    }
}

// ============================================================================
// Display
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MockDisplay(Arc<Mutex<Vec<(usize, u32)>>>);

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(register, value)` writes, oldest first.
    pub fn writes(&self) -> Vec<(usize, u32)> {
        lock(&self.0).clone()
    }

    /// Last value written to each register.
    pub fn registers(&self) -> [u32; 4] {
        let mut regs = [0; 4];
        for &(index, value) in lock(&self.0).iter() {
            regs[index] = value;
        }
        regs
    }
}

impl SegmentDisplay for MockDisplay {
    const REGISTERS: usize = 4;

    fn write_register(&mut self, index: usize, value: u32) -> Result<(), DisplayError> {
        if index >= Self::REGISTERS {
            return Err(DisplayError::InvalidRegister(index));
        }
        lock(&self.0).push((index, value));
        Ok(())
    }
}

// ============================================================================
// Timer
// ============================================================================

type DelayHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct TimerState {
    now_us: u64,
    delays_us: Vec<u32>,
    on_delay: Option<DelayHook>,
}

impl fmt::Debug for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerState")
            .field("now_us", &self.now_us)
            .field("delays_us", &self.delays_us)
            .field("on_delay", &self.on_delay.is_some())
            .finish()
    }
}

/// Fake time base. Delays return at once, advance the clock and are
/// recorded.
#[derive(Debug, Clone, Default)]
pub struct MockTimer(Arc<Mutex<TimerState>>);

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `hook` inside every delay, standing in for interrupts taken while
    /// the CPU busy-waits.
    pub fn on_delay(&self, hook: impl Fn() + Send + Sync + 'static) {
        lock(&self.0).on_delay = Some(Arc::new(hook));
    }

    pub fn delays_us(&self) -> Vec<u32> {
        lock(&self.0).delays_us.clone()
    }

    pub fn delays_ms(&self) -> Vec<u32> {
        self.delays_us().into_iter().map(|us| us / 1000).collect()
    }
}

impl CountingTimer for MockTimer {
    fn now_us(&self) -> u64 {
        lock(&self.0).now_us
    }

    fn delay_us(&self, us: u32) {
        let hook = {
            let mut state = lock(&self.0);
            state.delays_us.push(us);
            state.now_us += us as u64;
            state.on_delay.clone()
        };
        if let Some(hook) = hook {
            hook();
        }
    }
}

// ============================================================================
// Platform
// ============================================================================

/// A board assembled from fakes, keyed by device id.
#[derive(Debug, Default)]
pub struct MockPlatform {
    gpios: BTreeMap<DeviceId, MockGpio>,
    uarts: BTreeMap<DeviceId, MockUart>,
    intcs: BTreeMap<DeviceId, MockIntc>,
    iics: BTreeMap<DeviceId, MockIic>,
    displays: BTreeMap<DeviceId, MockDisplay>,
    timer: MockTimer,
    installs: u32,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gpio(mut self, id: DeviceId, gpio: MockGpio) -> Self {
        self.gpios.insert(id, gpio);
        self
    }

    pub fn with_uart(mut self, id: DeviceId, uart: MockUart) -> Self {
        self.uarts.insert(id, uart);
        self
    }

    pub fn with_intc(mut self, id: DeviceId, intc: MockIntc) -> Self {
        self.intcs.insert(id, intc);
        self
    }

    pub fn with_iic(mut self, id: DeviceId, iic: MockIic) -> Self {
        self.iics.insert(id, iic);
        self
    }

    pub fn with_display(mut self, id: DeviceId, display: MockDisplay) -> Self {
        self.displays.insert(id, display);
        self
    }

    pub fn with_timer(mut self, timer: MockTimer) -> Self {
        self.timer = timer;
        self
    }

    /// How often the CPU interrupt hook was installed.
    pub fn installs(&self) -> u32 {
        self.installs
    }
}

fn take<T: Clone>(
    devices: &BTreeMap<DeviceId, T>,
    kind: DeviceKind,
    id: DeviceId,
) -> Result<T, PlatformError> {
    devices
        .get(&id)
        .cloned()
        .ok_or(PlatformError::ConfigNotFound { kind, id })
}

impl Platform for MockPlatform {
    type Gpio = MockGpio;
    type Uart = MockUart;
    type Intc = MockIntc;
    type Iic = MockIic;
    type Display = MockDisplay;
    type Timer = MockTimer;

    fn name(&self) -> &'static str {
        "mock"
    }

    fn init_gpio(&mut self, id: DeviceId) -> Result<MockGpio, PlatformError> {
        take(&self.gpios, DeviceKind::Gpio, id)
    }

    fn init_uart(&mut self, id: DeviceId) -> Result<MockUart, PlatformError> {
        let uart = take(&self.uarts, DeviceKind::Uart, id)?;
        {
            let mut state = lock(&uart.0);
            state.initialized = true;
            state.interrupt_enabled = false;
        }
        Ok(uart)
    }

    fn init_interrupt_controller(&mut self, id: DeviceId) -> Result<MockIntc, PlatformError> {
        let intc = take(&self.intcs, DeviceKind::InterruptController, id)?;
        intc.reset();
        Ok(intc)
    }

    fn init_iic(&mut self, id: DeviceId) -> Result<MockIic, PlatformError> {
        let iic = take(&self.iics, DeviceKind::Iic, id)?;
        if lock(&iic.0).fail_reset {
            return Err(PlatformError::InitFailed {
                kind: DeviceKind::Iic,
                id,
            });
        }
        Ok(iic)
    }

    fn init_display(&mut self, id: DeviceId) -> Result<MockDisplay, PlatformError> {
        take(&self.displays, DeviceKind::Display, id)
    }

    fn timer(&mut self) -> MockTimer {
        self.timer.clone()
    }

    unsafe fn install_interrupt_handler(&mut self) {
        self.installs += 1;
    }
}
