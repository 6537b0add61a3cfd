mod district;

pub use district::District;
