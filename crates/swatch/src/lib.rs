#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use swatch_color as color;

#[doc(inline)]
pub use swatch_image as image;

#[doc(inline)]
pub use swatch_io as io;

#[doc(inline)]
pub use swatch_palette as palette;

#[doc(inline)]
pub use swatch_reference as reference;
