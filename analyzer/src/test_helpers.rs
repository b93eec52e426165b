use ilgen_dsl::decl::{Library, TypeDeclaration, TypeReference};

#[ctor::ctor]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn class_with_fields(name: &str, field_types: &[&str]) -> TypeDeclaration {
    field_types
        .iter()
        .enumerate()
        .fold(TypeDeclaration::class(name), |decl, (idx, ty)| {
            decl.with_field(&format!("f{idx}"), TypeReference::named(ty))
        })
}

pub fn library_of(declarations: Vec<TypeDeclaration>) -> Library {
    Library { declarations }
}
