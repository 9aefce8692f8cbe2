pub mod resolver;
pub mod resource;

pub use resolver::{
    ImageKind, ImageResolver, MathGraphic, MathResolver, PathOp, ResolvedImage, ResolvedMath,
    UnavailableImageResolver, UnavailableMathResolver,
};
pub use resource::{ResourceError, ResourceProvider, SharedResourceData};

#[cfg(any(test, feature = "testing"))]
pub use resource::InMemoryResourceProvider;
