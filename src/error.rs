use custom_error::custom_error;

custom_error! { pub RejectError
    InvalidIdentifier              = "invalid order id (0)",
    InvalidPrice{price: f64}       = "invalid price: {price}",
    InvalidQuantity{quantity: u64} = "invalid quantity: {quantity}",
    DuplicateId{id: u64}           = "duplicate order id: {id}",
    UnknownId{id: u64}             = "order not found: {id}",
    InactiveOrder{id: u64}         = "order is inactive: {id}",
}
