mod decode;
pub mod loader;
pub mod player;

pub use decode::PreparedAudio;
pub use loader::{AudioLoader, HttpLoader};
pub use player::{open_default_player, AudioPlayer, NullPlayer, RodioPlayer};
