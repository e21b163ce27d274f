//! UK Universal Credit entitlement calculator.
//!
//! The [`core`] module holds the calculation engine: profiles, regional
//! housing rates, elements, deductions and the final monthly award. The
//! [`cmd`] module is the command line front end built on top of it.

pub mod cmd;
pub mod core;
