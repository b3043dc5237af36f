pub mod d410_inventory;
