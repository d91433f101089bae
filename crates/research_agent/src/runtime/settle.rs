use std::any::Any;
use std::thread;

use crate::domain::DomainError;

/// Turns a joined branch into a plain result so one panicking branch cannot take its
/// sibling down with it.
pub fn settle<T>(joined: thread::Result<T>) -> Result<T, DomainError> {
    joined.map_err(|payload| DomainError::Internal(panic_message(payload.as_ref())))
}

pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("branch panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("branch panicked: {msg}")
    } else {
        "branch panicked".to_string()
    }
}
