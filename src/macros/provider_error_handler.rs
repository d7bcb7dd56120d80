/// unwrap a provider result inside a route, or return the matching http status.
/// lookups that matched nothing are logged as info, everything else as an error.
macro_rules! provider_handle_error_http {
    ( $data:expr, $target:expr, $type_str:expr) => {
        match $data {
            Ok(e) => e,
            Err(error) => {
                let status = error.status();
                if status == Status::NotFound || status == Status::BadRequest {
                    info!(target:$target, "Could not get {}. (error: {})", $type_str, error);
                } else {
                    error!(target:$target, "Error getting {}. (error: {})", $type_str, error);
                }
                return Err(status);
            }
        }
    }
}

/// unwrap a provider result, falling back to the default value on any error.
macro_rules! provider_fail_soft {
    ( $data:expr, $target:expr, $type_str:expr) => {
        match $data {
            Ok(e) => e,
            Err(error) => {
                error!(target:$target, "Error getting {}, answering empty. (error: {})", $type_str, error);
                Default::default()
            }
        }
    }
}

pub(crate) use provider_handle_error_http;
pub(crate) use provider_fail_soft;
