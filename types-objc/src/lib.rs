//! Semantic core of the Java to Objective-C translator.
//!
//! A translation unit enters through [`Types::initialize`], which binds every
//! significant node of its syntax tree and sets up the runtime types generated
//! code is written against. Passes then consult and extend the registry: they
//! map source types and methods to runtime ones, queue node substitutions,
//! copy subtrees with [`Types::copy_subtree`] and record pruned hierarchies.
//! Code generators read the results, including the import sets produced by
//! [`ImportCollector`]. [`Types::cleanup`] ends the unit.
//!
//! Nothing here is global. Each unit in flight owns its registry, and bindings
//! are plain handles into the frontend's [`SourceModel`] or the registry's own
//! [`SyntheticUniverse`](synthetic::SyntheticUniverse).

pub mod binding;
pub mod copy;
pub mod error;
pub mod hierarchy;
pub mod imports;
pub mod names;
pub mod options;
pub mod registry;
pub mod synthetic;
pub mod table;
pub mod universe;
pub mod view;

pub use binding::source::SourceModel;
pub use binding::source::SourceModelBuilder;
pub use binding::Binding;
pub use binding::MethodBinding;
pub use binding::TypeBinding;
pub use binding::VariableBinding;
pub use copy::Replacement;
pub use copy::SubstitutionListener;
pub use error::TypesError;
pub use error::TypesResult;
pub use imports::Import;
pub use imports::ImportCollector;
pub use options::TypesOptions;
pub use registry::Types;
pub use table::BindingTable;
pub use view::NullType;
pub use view::TypeView;
