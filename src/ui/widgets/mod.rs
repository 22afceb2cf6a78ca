pub mod wheel;

pub use wheel::WheelView;
