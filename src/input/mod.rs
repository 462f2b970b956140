mod keymap;

pub use keymap::map_key_to_command;
