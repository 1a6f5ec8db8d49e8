use embassy_time::Duration;
use log::{info, warn};
use myrtio_registry::{LightSwitch as _, Operation, RegistrationBody, RequestResult};

use crate::infrastructure::services::{
    RegistrationEvent,
    RequestContext,
    registration_event_sender,
    send_registry_request,
};

/// One outbound registry call.
///
/// The coordinator keeps at most one call in flight. The second slot lets a
/// compensating call start while the previous task is still handing its
/// result to a full event queue. The task reports exactly one result and
/// exits.
#[embassy_executor::task(pool_size = 2)]
pub(crate) async fn registry_request_task(operation: Operation, context: &'static RequestContext) {
    let body = RegistrationBody {
        name: context.device_name,
        is_light_on: context.light.is_light_on(),
        uptime: context.uptime.ticks(),
    };

    let result = match send_registry_request(
        context.stack,
        &context.address,
        operation,
        &body,
        Duration::from_secs(context.timeout_secs),
    )
    .await
    {
        Ok(code) => {
            info!("registry: {} answered {}", operation.as_str(), code);
            RequestResult::Status(code)
        }
        Err(e) => {
            warn!("registry: {} failed: {}", operation.as_str(), e);
            RequestResult::TransportFailure
        }
    };

    registration_event_sender()
        .send(RegistrationEvent::RequestCompleted(result))
        .await;
}
