//! View-model types for the veneer generator.
//!
//! These types are the output of the generation pipeline and the input of
//! whatever renders target-language source text.
//!
//! # Architecture
//!
//! ```text
//! model + gapic.yaml → veneer-codegen (resolve, assemble) → veneer-viewmodel → renderer
//! ```
//!
//! The views are:
//! - Language-agnostic in shape (names inside are already cased for one language)
//! - Plain data with no behaviour beyond a few convenience predicates
//! - Self-contained (no dependencies beyond serde)

mod api;
mod init_code;
mod interface;
mod method;
mod output;

pub use api::ApiView;
pub use init_code::{
    FieldSettingView, InitCodeLineView, InitCodeView, InitValueView, ListInitCodeLineView,
    MapEntryView, MapInitCodeLineView, SimpleInitCodeLineView, StructureInitCodeLineView,
};
pub use interface::{
    BatchingDescriptorClassView, InterfaceView, PageStreamingDescriptorView, ResourceNameView,
    RetryCodesView, RetryParamsView, SmokeTestView,
};
pub use method::{
    BatchingDescriptorView, BatchingThresholdsView, BatchingView, FieldNamePatternView,
    FlatteningGroupView, LongRunningView, MethodView, PageStreamingRequestView,
    PageStreamingResponseView, PageStreamingView, ParamView,
};
pub use output::{
    ArrayLoopView, CommentView, DefineView, MapLoopView, OutputView, PrintView, SampleView,
    StringFormatView, VariableView, WriteFileView,
};
