pub mod item;
pub mod position;
pub mod section;

pub use item::Item;
pub use position::Position;
pub use section::Section;
