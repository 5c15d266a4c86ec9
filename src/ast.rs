//! # Lucene Query Abstract Syntax Tree
//!
//! This module defines the tree a Lucene query string is parsed into and the
//! renderer lowers into the target query document.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Operator tags (boolean, field clauses, terms, modifiers)
//! - **[expressions]** - Expression nodes, operands, columns and range boundaries
//! - **[builders]** - Construction helpers for building trees by hand
//!
//! ## Quick Start
//!
//! ```text
//! title:elastic~2^1.5 AND price:[10 TO *]
//! ```
//!
//! parses into
//!
//! ```text
//! AND(BOOST(FUZZY(EQUALS(title, "elastic~2^1.500000"))), RANGE(price, [10 TO *]))
//! ```
//!
//! ## Core Concepts
//!
//! ### Operands
//!
//! An operand is one of a nested expression, a column (field name), a literal
//! value, a range boundary or a list of terms. Field clauses always carry a
//! column on the left, so the renderer never has to guess which side names
//! the field.
//!
//! ### Numeric Literals
//!
//! Terms keep the type they were written with: `5` is an integer, `1.5` a
//! float and `foo` a string. Range bounds render with that type; query
//! strings and single-sided comparisons use the text form.
//!
//! ### Modifiers
//!
//! `^` and `~` wrap the clause before them. The suffix is baked into the
//! wrapped term when the node is built, so trees are never modified after
//! construction.
//!
//! ## Examples
//!
//! ### Membership
//!
//! ```text
//! tag:(rust OR go OR zig)     // IN(tag, LIST(rust, go, zig))
//! ```
//!
//! ### Open Range
//!
//! ```text
//! age:{18 TO *}               // RANGE(age, {18 TO *})
//! ```
pub mod builders;
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use builders::{
    and, boost, eq, fuzzy, greater, greater_eq, in_list, less, less_eq, like, list, lit, must,
    must_not, not, or, range, regexp, wild,
};
pub use expressions::{
    Bound, Column, ExprError, Expression, MAX_DEPTH, Operand, RangeBoundary,
};
pub use operators::Operator;
pub use tokens::Token;
