pub mod adb;
pub mod avd;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod detect;
pub mod emulator;
pub mod output;
pub mod readiness;

// Re-export core types for convenience
pub use adb::{AdbClient, DeviceRegistry};
pub use config::{Config, LaunchRequest, SdkPaths};
