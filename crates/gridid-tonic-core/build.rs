/// Builds the gRPC client and server code for `gridid.proto` using
/// `tonic-prost-build`.
///
/// The `payload` field of `Envelope` is generated as `Bytes` (from the `bytes`
/// crate) instead of `Vec<u8>`, so envelopes convert to and from
/// `gridid::RequestEnvelope`/`gridid::ResponseEnvelope` without copying.
///
/// Generated code is exposed as `gridid_tonic_core::proto`.
fn main() {
    let mut config = tonic_prost_build::Config::new();

    // Keep the payload as `Bytes`, not `Vec<u8>`
    config.bytes([".gridid.Envelope.payload"]);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/gridid.proto"], &["proto"])
        .unwrap();
}
