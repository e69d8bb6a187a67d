//! IIC link to the temperature sensor.
//!
//! Bring-up only: the controller is reset, pointed at the sensor, and its
//! interrupt is routed to the send, receive and status handlers. Nothing
//! starts a transfer yet; the handlers keep the completion flags a transfer
//! routine would wait on.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use common::arch::ArchIrq;
use common::sync::IrqSpinLock;
use drivers::hal::i2c::{AddressType, I2cController, I2cError, I2cEvents};

/// Completion flags shared between the IIC handlers and whoever starts a
/// transfer.
#[derive(Debug, Default)]
pub struct TransferState {
    transmit_pending: AtomicBool,
    receive_pending: AtomicBool,
    last_status: AtomicU32,
}

impl TransferState {
    pub const fn new() -> Self {
        Self {
            transmit_pending: AtomicBool::new(false),
            receive_pending: AtomicBool::new(false),
            last_status: AtomicU32::new(0),
        }
    }

    /// Mark a send as in flight; the send handler clears it.
    pub fn begin_transmit(&self) {
        self.transmit_pending.store(true, Ordering::Release);
    }

    /// Mark a receive as in flight; the receive handler clears it.
    pub fn begin_receive(&self) {
        self.receive_pending.store(true, Ordering::Release);
    }

    pub fn transmit_pending(&self) -> bool {
        self.transmit_pending.load(Ordering::Acquire)
    }

    pub fn receive_pending(&self) -> bool {
        self.receive_pending.load(Ordering::Acquire)
    }

    /// Bus events last reported to the status handler.
    pub fn last_status(&self) -> I2cEvents {
        I2cEvents::from_bits_truncate(self.last_status.load(Ordering::Relaxed))
    }
}

pub type EventHandler = fn(&TransferState, I2cEvents);

pub fn send_complete(state: &TransferState, _events: I2cEvents) {
    state.transmit_pending.store(false, Ordering::Release);
}

pub fn receive_complete(state: &TransferState, _events: I2cEvents) {
    state.receive_pending.store(false, Ordering::Release);
}

pub fn bus_status(state: &TransferState, events: I2cEvents) {
    state
        .last_status
        .store((events & I2cEvents::STATUS).bits(), Ordering::Relaxed);
}

pub struct SensorLink<I> {
    iic: IrqSpinLock<I, ArchIrq>,
    state: TransferState,
    send: Option<EventHandler>,
    receive: Option<EventHandler>,
    status: Option<EventHandler>,
}

impl<I: I2cController<Error = I2cError>> SensorLink<I> {
    pub fn new(iic: I) -> Self {
        Self {
            iic: IrqSpinLock::new(iic),
            state: TransferState::new(),
            send: None,
            receive: None,
            status: None,
        }
    }

    pub fn set_send_handler(&mut self, handler: EventHandler) {
        self.send = Some(handler);
    }

    pub fn set_receive_handler(&mut self, handler: EventHandler) {
        self.receive = Some(handler);
    }

    pub fn set_status_handler(&mut self, handler: EventHandler) {
        self.status = Some(handler);
    }

    /// Address the sensor is reached at.
    pub fn set_target_address(&self, address: u16) -> Result<(), I2cError> {
        self.iic
            .with(|iic| iic.set_address(AddressType::Send, address))
    }

    pub fn target_address(&self) -> Option<u16> {
        self.iic.with(|iic| iic.target_address())
    }

    pub fn state(&self) -> &TransferState {
        &self.state
    }

    /// IIC interrupt body: collect the controller's events and hand them to
    /// the registered handlers.
    pub fn service(&self) -> I2cEvents {
        let events = self.iic.with(|iic| iic.service_interrupt());

        let routes = [
            (I2cEvents::SENT, self.send),
            (I2cEvents::RECEIVED, self.receive),
            (I2cEvents::STATUS, self.status),
        ];
        for (mask, handler) in routes {
            if let Some(handler) = handler.filter(|_| events.intersects(mask)) {
                handler(&self.state, events);
            }
        }

        events
    }
}
