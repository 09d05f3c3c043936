//! Command handlers. Each one turns parsed arguments into a core call and
//! renders the result.

pub mod create;
