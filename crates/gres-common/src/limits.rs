//! Centralized limits and thresholds for the resolution engine.
//!
//! Constraint chains between type parameters are resolved iteratively and
//! need no depth limit; cycles among them are rejected outright. The limits
//! below bound the walks that follow declared base types, where a cycle is
//! reported separately but a pathological (very long) hierarchy should not
//! turn a single query into unbounded work.

/// Maximum number of base-class links followed by a single
/// "is derived from" query.
///
/// Used as the default for `ResolutionOptions::max_base_class_depth`. When
/// exceeded the query answers "not derived", which for most-derived
/// selection surfaces as a conflicting-base-class declaration error rather
/// than a hang.
///
/// # C# example
///
/// ```text
/// class A0 {}
/// class A1 : A0 {}
/// class A2 : A1 {}
/// // ... 256 levels ...
/// class C<T, U> where T : A0 where U : A256, T {}
/// ```
pub const MAX_BASE_CLASS_CHAIN_DEPTH: u32 = 256;

/// Maximum number of definitions visited when checking a single definition
/// for an inheritance cycle (`class A : B {}`, `class B : A {}`).
pub const MAX_INHERITANCE_WALK: u32 = 10_000;

/// Initial capacity of the per-compilation type interner.
pub const INITIAL_TYPE_TABLE_CAPACITY: usize = 64;
