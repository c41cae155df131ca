//! Controller module - section routing, form submission and rendering
//! through the [`View`] seam.

mod generations;
mod section;
mod view;
mod view_controller;

#[cfg(test)]
mod controller_tests;

pub use generations::{SectionGenerations, Ticket};
pub use section::{AuthTab, Section};
pub use view::{Notification, NotificationLevel, View};
pub use view_controller::{ViewCache, ViewController};
