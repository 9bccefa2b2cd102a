//! Logger module
//!
//! println/eprintln-based logging for server lifecycle, access logs, and
//! errors. Access log lines carry a local timestamp in the usual
//! `%d/%b/%Y:%H:%M:%S %z` form.

use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

use crate::config::Config;

fn timestamp() -> String {
    Local::now().format("%d/%b/%Y:%H:%M:%S %z").to_string()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Command-echo server started");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Registered routes: {}", config.routes.len());
    for route in &config.routes {
        println!("  {} -> {}", route.path, route.command.join(" "));
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[{}] [Request] {method} {uri} {version:?}", timestamp());
}

pub fn log_response(status: u16, size: usize) {
    println!("[{}] [Response] {status} ({size} bytes)", timestamp());
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_shutdown_requested() {
    println!("\n[Shutdown] Stop accepting new connections");
}

pub fn log_shutdown_draining(active: usize, grace_secs: u64) {
    println!("[Shutdown] Waiting up to {grace_secs}s for {active} in-flight connection(s)");
}

pub fn log_shutdown_complete() {
    println!("[Shutdown] Server stopped");
}
