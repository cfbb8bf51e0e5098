//! Shared application state.

use complaint_core::Desk;

pub struct AppState {
  pub desk: Desk,
}
