use super::{ClusterTableSink, GridClient, diag};
use crate::{
    AllocatedJobId, AllocationError, CrossClusterJobId, DirectoryConnection, MessageType,
    RequestEnvelope,
};

impl<S: ClusterTableSink> GridClient<S> {
    /// Requests one new cross-cluster job id from the directory service.
    ///
    /// The directory signals an exhausted allocation pool by answering a
    /// successful exchange with the zero sentinel. That case and a failed
    /// exchange both yield an [`AllocationError`]; callers that need to tell
    /// them apart have to rely on the diagnostic log.
    ///
    /// A returned id is never [`CrossClusterJobId::NONE`].
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] if the exchange fails, the response is
    /// truncated, or the directory returns `0`.
    pub fn allocate_identifier<C>(
        &self,
        conn: &mut C,
    ) -> Result<CrossClusterJobId, AllocationError>
    where
        C: DirectoryConnection + ?Sized,
    {
        let request = RequestEnvelope::new(self.config.protocol_version, MessageType::JobIdRequest);
        let response = conn.send_recv(request);
        diag!(
            self,
            transport = super::outcome(&response),
            "job id request exchanged"
        );

        // The decoded value is only looked at when the exchange completed.
        let allocated = response
            .and_then(|resp| resp.decode::<AllocatedJobId>())
            .map_err(AllocationError::transport)
            .and_then(|AllocatedJobId(id)| {
                if id.is_none() {
                    Err(AllocationError::exhausted())
                } else {
                    Ok(id)
                }
            });

        diag!(
            self,
            result = super::outcome(&allocated),
            job_id = allocated.as_ref().map_or(0, |id| id.to_raw()),
            "job id allocation finished"
        );
        allocated
    }
}
