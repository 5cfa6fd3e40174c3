//! Kani proofs for the throne settlement model

#![cfg_attr(kani, feature(register_tool), register_tool(kanitool))]

pub mod generators;

#[cfg(kani)]
pub mod minimal;

#[cfg(kani)]
pub mod safety;
