pub mod hexdump;
