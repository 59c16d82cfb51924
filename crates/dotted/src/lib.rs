pub use dotted_path::{
    divide_path, is_truthy, remove, remove_paths, resolve, resolve_with, resolves, resolves_with,
    set, set_with, size, Segment, Segments,
};
pub use dotted_query::{query, Clause, Expect, Filter, Match, Operator, Predicate};
pub use dotted_shape::{
    expand, filter, flatten, merge, merged, project, set_types, FlattenOptions, PathCheck,
    PathPredicate, Projection, Rule, Transform,
};

pub mod prelude {
    pub use crate::{
        divide_path, expand, filter, flatten, merge, merged, project, query, remove, remove_paths,
        resolve, resolves, set, set_types,
    };
    pub use crate::{Filter, FlattenOptions, PathCheck, Projection, Segment};
}
