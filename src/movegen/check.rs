//! Compile-time dispatch between in-check and not-in-check move generation.
//!
//! Generating moves while in check needs an extra `check_mask` filter (and
//! forbids castling); encoding that as a type parameter lets the compiler
//! specialize `gen_knights`/`gen_sliders`/`gen_pawns`/`gen_king` per case
//! instead of branching on a runtime flag inside every generator.
pub trait CheckType {
    const IN_CHECK: bool;
}

pub struct InCheck;
pub struct NotInCheck;

impl CheckType for InCheck {
    const IN_CHECK: bool = true;
}

impl CheckType for NotInCheck {
    const IN_CHECK: bool = false;
}
