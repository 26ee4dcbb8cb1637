//! Instruction implementations, grouped by family.
//!
//! Each module provides `execute_*` functions called from the step
//! loop's dispatch match. Handlers own the whole instruction: operand
//! resolution, state mutation, flag evaluation, and the IP advance.

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod stack;
