//! 红外收发
pub mod capture;
pub mod edge;
pub mod encode;
pub mod keymap;
pub mod nec;
pub mod receiver;
pub mod transmit;

pub use edge::{Edge, EdgeBuffer, EdgeEvent, EdgeKind};
pub use encode::Pulse;
pub use nec::{decode, DecodeError, NecFrame, NecTiming, Protocol};
pub use receiver::{DecodeFailure, IrEvent, IrReceiver};
pub use transmit::{Carrier, NecTransmitter};
