mod home;
pub use home::Home;

mod story;
pub use story::Story;
