// handlers/mod.rs - Public (no auth) and protected (HTTP Basic) handlers

pub mod protected;
pub mod public;
