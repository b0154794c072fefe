//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::CheckoutIncomplete(step) => StatusError::bad_request()
            .brief(format!("Checkout is incomplete, next step is {step}")),
        OrdersServiceError::NotEnoughStock => StatusError::conflict().brief("Not enough stock"),
        OrdersServiceError::AlreadyPaid => StatusError::conflict().brief("Order is already paid"),
        OrdersServiceError::NotPaid => StatusError::conflict().brief("Order has not been paid"),
        OrdersServiceError::AlreadyDelivered => {
            StatusError::conflict().brief("Order is already delivered")
        }
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Pricing(source) => {
            error!("failed to price order: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use emporium::checkout::CheckoutStep;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn incomplete_checkout_names_the_step() {
        let error = into_status_error(OrdersServiceError::CheckoutIncomplete(
            CheckoutStep::PaymentMethod,
        ));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "Checkout is incomplete, next step is payment_method");
    }
}
