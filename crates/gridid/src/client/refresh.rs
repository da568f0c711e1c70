use super::{ClusterTableSink, GridClient, diag};
use crate::{DirectoryConnection, MessageType, RequestEnvelope, Result};

impl<S: ClusterTableSink> GridClient<S> {
    /// Asks the directory service to resend the full cluster table.
    ///
    /// On a completed exchange the raw table is handed to the client's
    /// [`ClusterTableSink`] without inspection. The result reflects only the
    /// transport outcome.
    ///
    /// # Errors
    ///
    /// Returns the [`TransportError`](crate::TransportError) from the
    /// connection unchanged.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
    pub fn refresh_cluster_table<C>(&self, conn: &mut C) -> Result<()>
    where
        C: DirectoryConnection + ?Sized,
    {
        #[cfg(feature = "tracing")]
        tracing::info!("Obtaining updated cluster table from the directory service");

        let request = RequestEnvelope::new(
            self.config.protocol_version,
            MessageType::ClusterTableRequest,
        );
        let response = conn.send_recv(request)?;
        diag!(
            self,
            msg_type = %response.msg_type,
            bytes = response.payload.len(),
            "cluster table received"
        );
        self.sink.apply(response.payload);
        Ok(())
    }
}
