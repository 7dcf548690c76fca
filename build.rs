use std::{env, path::PathBuf};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Generates the PersonService client and server stubs. Messages are
// hand-written prost types in src/protocol.rs, so no protoc is required.
fn main() -> Result<()> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    let codec_path = "tonic::codec::ProstCodec";

    let person_service = tonic_build::manual::Service::builder()
        .name("PersonService")
        .package("person")
        .method(
            tonic_build::manual::Method::builder()
                .name("create")
                .route_name("Create")
                .input_type("crate::protocol::CreatePersonRequest")
                .output_type("crate::protocol::PersonProfileResponse")
                .codec_path(codec_path)
                .build(),
        )
        .method(
            tonic_build::manual::Method::builder()
                .name("read")
                .route_name("Read")
                .input_type("crate::protocol::SinglePersonRequest")
                .output_type("crate::protocol::PersonProfileResponse")
                .codec_path(codec_path)
                .build(),
        )
        .method(
            tonic_build::manual::Method::builder()
                .name("update")
                .route_name("Update")
                .input_type("crate::protocol::UpdatePersonRequest")
                .output_type("crate::protocol::SuccessResponse")
                .codec_path(codec_path)
                .build(),
        )
        .method(
            tonic_build::manual::Method::builder()
                .name("delete")
                .route_name("Delete")
                .input_type("crate::protocol::SinglePersonRequest")
                .output_type("crate::protocol::SuccessResponse")
                .codec_path(codec_path)
                .build(),
        )
        .build();

    tonic_build::manual::Builder::new()
        .out_dir(out_dir)
        .compile(&[person_service]);

    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
