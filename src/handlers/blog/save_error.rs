use crate::{
    domain::blog::blog::BlogSaveError,
    errors::code_error::{CodeError, CodeErrorResp, code_err, store_err},
};

pub fn blog_save_err(fallback: CodeError, e: BlogSaveError) -> CodeErrorResp {
    match e {
        BlogSaveError::EmptySlug(_) => code_err(CodeError::TITLE_HAS_NO_SLUG, e),
        BlogSaveError::Store(e) => store_err(fallback, e),
    }
}
