mod entity_id;
mod nested;

pub use entity_id::EntityId;
pub use nested::first_of_many;
