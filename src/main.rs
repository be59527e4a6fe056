// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Markdown Magic - Main Entry Point
//!
//! A markdown editor with a live rendered preview, built with Rust and egui.

mod app;
mod editor;
mod error;
mod export;
mod files;
mod preview;
mod render;
mod state;
mod string_utils;
mod theme;

use app::MagicApp;
use log::info;

/// Application name constant.
const APP_NAME: &str = "Markdown Magic";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([1100.0, 720.0])
        .with_min_inner_size([500.0, 320.0]);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(MagicApp::new(cc)))),
    )
}
