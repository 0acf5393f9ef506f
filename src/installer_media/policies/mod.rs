mod selection_policy;

pub use selection_policy::SelectionPolicy;
