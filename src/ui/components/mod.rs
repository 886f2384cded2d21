pub mod controls;
pub mod login;
pub mod player;
pub mod progress;
pub mod spinner;
pub mod status;
pub mod tabs;
pub mod track_list;
