/*!
 * Validation of generated cues.
 *
 * - `timecodes`: timing integrity, reading speed and coverage
 * - `length`: on-screen line length
 * - `service`: runs the enabled validators and builds a report
 */

pub mod length;
pub mod service;
pub mod timecodes;

pub use service::{ValidationConfig, ValidationReport, ValidationService};
