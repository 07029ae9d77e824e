//! Org-chart Core Types
//!
//! This crate provides the value types shared by the org-chart crates:
//!
//! - **Employees**: Directory records referencing managers by email ([`employee::EmployeeRecord`])
//! - **Identifiers**: Interned, normalized join keys ([`identifier::Id`])
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)
//! - **Colors**: CSS color parsing for rendering ([`color::Color`])

pub mod color;
pub mod employee;
pub mod geometry;
pub mod identifier;
