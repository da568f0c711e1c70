use super::{ClusterTableSink, GridClient, diag};
use crate::{
    ClusterIndex, CrossClusterJobId, DirectoryConnection, JobOwner, MessageType, RequestEnvelope,
    Result,
};

impl<S: ClusterTableSink> GridClient<S> {
    /// Asks the directory service which cluster owns `job_id`.
    ///
    /// `job_id` is sent as given, including the zero sentinel. Every decoded
    /// index is returned as-is; `0` is an ordinary cluster index.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`](crate::TransportError) if the exchange
    /// fails or the response is truncated.
    pub fn resolve_owner<C>(&self, conn: &mut C, job_id: CrossClusterJobId) -> Result<ClusterIndex>
    where
        C: DirectoryConnection + ?Sized,
    {
        let request = RequestEnvelope::new(self.config.protocol_version, MessageType::JobOwnerRequest)
            .with_scalar(job_id.to_raw());
        let response = conn.send_recv(request);
        diag!(
            self,
            transport = super::outcome(&response),
            %job_id,
            "job owner request exchanged"
        );

        let JobOwner(index) = response?.decode::<JobOwner>()?;
        diag!(self, %job_id, %index, "job id has cluster index");
        Ok(index)
    }
}
