mod cursor;

pub use cursor::ByteCursor;
