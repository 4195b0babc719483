// A plain native build only prints the hint below; the page modules are
// reached from `frontend` on wasm32 and from the unit tests.
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod app;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod config;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod contact;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod dom;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod error_handler;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod language;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod logging;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod page;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod performance;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod prefs;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod preview;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod scroll;
#[cfg_attr(not(any(test, target_arch = "wasm32")), allow(dead_code))]
mod theme;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(test)]
mod testing;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This crate drives the portfolio page in the browser. Build it for wasm32 and load it from the page.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
