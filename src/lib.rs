//! # **Rankflow** - *Dynamic-rank numeric kernels*
//!
//! Rankflow evaluates array expressions over values whose rank (0 to 3) and
//! element kind (numeric or boolean) are only known at runtime.
//!
//! It exposes two host entry points:
//! - [`evaluate_binary`] applies an elementwise [`BinaryOperator`] with
//!   NumPy-style broadcasting and picks the result's stored representation.
//! - [`evaluate_contraction`] computes dot, outer and tensordot products.
//!
//! Both are pure and synchronous. They read their operands, allocate one
//! fresh result and never mutate an input, so values can be shared across
//! threads freely.
//!
//! ```
//! use rankflow::{evaluate_binary, ArrayValue, BinaryOperator, BinaryOptions, ElementKind};
//!
//! let v = ArrayValue::vector(vec![0.0, 2.0, 1.0, 2.0]);
//! let r = evaluate_binary(
//!     BinaryOperator::NotEqual,
//!     &v,
//!     &ArrayValue::scalar(2.0),
//!     &BinaryOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(r.element_kind(), ElementKind::Numeric);
//! assert_eq!(&*r.numeric_data(), &[1.0, 0.0, 1.0, 0.0]);
//! assert_eq!(&*r.boolean_data(), &[1, 0, 1, 0]);
//! ```
//!
//! ## Features
//! - `parallel_proc` splits large elementwise loops and matrix products
//!   across the `rayon` pool.

pub mod enums {
    pub mod array_data;
    pub mod element_kind;
    pub mod error;
    pub mod operators;
    pub mod shape_dim;
}

pub mod structs {
    pub mod array_value;
    pub mod buffer;
    pub mod options;
}

pub mod traits {
    pub mod print;
    pub mod shape;
    pub mod type_unions;
}

pub mod kernels {
    pub mod broadcast;
    pub mod contraction;
    pub mod elementwise;
    pub mod routing;
}

pub use enums::array_data::ArrayData;
pub use enums::element_kind::ElementKind;
pub use enums::error::KernelError;
pub use enums::operators::{BinaryOperator, OperatorFamily};
pub use enums::shape_dim::{MAX_RANK, ShapeDim};

pub use structs::array_value::ArrayValue;
pub use structs::buffer::Buffer;
pub use structs::options::{BinaryOptions, ContractAxes, ContractionMode, ContractionOptions};

pub use traits::print::Print;
pub use traits::shape::Shape;
pub use traits::type_unions::Element;

pub use kernels::broadcast::{BroadcastPlan, BroadcastRoute, broadcast_shapes};
pub use kernels::contraction::{dot, evaluate_contraction, outer, tensordot};
pub use kernels::elementwise::{
    equal, evaluate_binary, greater, greater_equal, less, less_equal, not_equal, resolve_output_kind,
};
