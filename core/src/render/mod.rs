//! Rendering
//!
//! Turns the grouped invoice list into text for the agent-facing surface.

pub mod markdown;

pub use markdown::{
    render_accounts, render_invoice_list, render_senders, render_status, render_sync,
};
