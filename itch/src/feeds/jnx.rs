//! JNX PTS-ITCH 1.6 message catalog.
//!
//! Column set and per-type field sequences follow the published Japannext
//! PTS ITCH 1.6 specification. Unlike TotalView, most messages carry a
//! 4-byte nanosecond offset relative to the last Timestamp-Seconds message.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::codec::{field, Codec, FieldDef};
use crate::feed::Feed;

/// Message types carried by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MessageType {
    /// Timestamp, seconds since midnight.
    TimestampSeconds = b'T',
    /// System event message.
    SystemEvent = b'S',
    /// Price tick size table entry.
    PriceTickSize = b'L',
    /// Orderbook directory.
    OrderbookDirectory = b'R',
    /// Trading state.
    TradingState = b'H',
    /// Short selling price restriction state.
    ShortSellingPriceRestriction = b'Y',
    /// Order added without attributes.
    OrderAdded = b'A',
    /// Order added with attributes.
    OrderAddedWithAttributes = b'F',
    /// Order executed.
    OrderExecuted = b'E',
    /// Order deleted.
    OrderDeleted = b'D',
    /// Order replaced.
    OrderReplaced = b'U',
}

/// Column indices into [`FIELDS`], one per message field, alphabetical.
pub mod col {
    pub const ATTRIBUTION: usize = 0;
    pub const BUY_SELL_INDICATOR: usize = 1;
    pub const EXECUTED_QUANTITY: usize = 2;
    pub const GROUP: usize = 3;
    pub const LOWER_PRICE_LIMIT: usize = 4;
    pub const MATCH_NUMBER: usize = 5;
    pub const NEW_ORDER_NUMBER: usize = 6;
    pub const ORDER_NUMBER: usize = 7;
    pub const ORDER_TYPE: usize = 8;
    pub const ORDERBOOK_CODE: usize = 9;
    pub const ORDERBOOK_ID: usize = 10;
    pub const ORIGINAL_ORDER_NUMBER: usize = 11;
    pub const PRICE: usize = 12;
    pub const PRICE_DECIMALS: usize = 13;
    pub const PRICE_START: usize = 14;
    pub const PRICE_TICK_SIZE: usize = 15;
    pub const PRICE_TICK_SIZE_TABLE_ID: usize = 16;
    pub const QUANTITY: usize = 17;
    pub const ROUND_LOT_SIZE: usize = 18;
    pub const SHORT_SELLING_STATE: usize = 19;
    pub const SYSTEM_EVENT: usize = 20;
    pub const TIMESTAMP_NANOSECONDS: usize = 21;
    pub const TIMESTAMP_SECONDS: usize = 22;
    pub const TRADING_STATE: usize = 23;
    pub const UPPER_PRICE_LIMIT: usize = 24;
}

/// Union of message-field columns across the catalog, alphabetical.
pub static FIELDS: &[FieldDef] = &[
    field("attribution", Codec::Ascii(4)),
    field("buy_sell_indicator", Codec::Char),
    field("executed_quantity", Codec::U32),
    field("group", Codec::Ascii(4)),
    field("lower_price_limit", Codec::U32),
    field("match_number", Codec::U64),
    field("new_order_number", Codec::U64),
    field("order_number", Codec::U64),
    field("order_type", Codec::Char),
    field("orderbook_code", Codec::Ascii(12)),
    field("orderbook_id", Codec::U32),
    field("original_order_number", Codec::U64),
    field("price", Codec::U32),
    field("price_decimals", Codec::U32),
    field("price_start", Codec::U32),
    field("price_tick_size", Codec::U32),
    field("price_tick_size_table_id", Codec::U32),
    field("quantity", Codec::U32),
    field("round_lot_size", Codec::U32),
    field("short_selling_state", Codec::Char),
    field("system_event", Codec::Char),
    field("timestamp_nanoseconds", Codec::U32),
    field("timestamp_seconds", Codec::U32),
    field("trading_state", Codec::Char),
    field("upper_price_limit", Codec::U32),
];

use col::*;

static TIMESTAMP_SECONDS_MSG: &[usize] = &[TIMESTAMP_SECONDS];

static SYSTEM_EVENT_MSG: &[usize] = &[TIMESTAMP_NANOSECONDS, GROUP, SYSTEM_EVENT];

static PRICE_TICK_SIZE_MSG: &[usize] = &[
    TIMESTAMP_NANOSECONDS,
    PRICE_TICK_SIZE_TABLE_ID,
    PRICE_TICK_SIZE,
    PRICE_START,
];

static ORDERBOOK_DIRECTORY: &[usize] = &[
    TIMESTAMP_NANOSECONDS,
    ORDERBOOK_ID,
    ORDERBOOK_CODE,
    GROUP,
    ROUND_LOT_SIZE,
    PRICE_TICK_SIZE_TABLE_ID,
    PRICE_DECIMALS,
    UPPER_PRICE_LIMIT,
    LOWER_PRICE_LIMIT,
];

static TRADING_STATE_MSG: &[usize] =
    &[TIMESTAMP_NANOSECONDS, ORDERBOOK_ID, GROUP, TRADING_STATE];

static SHORT_SELLING_STATE_MSG: &[usize] =
    &[TIMESTAMP_NANOSECONDS, ORDERBOOK_ID, GROUP, SHORT_SELLING_STATE];

static ORDER_ADDED: &[usize] = &[
    TIMESTAMP_NANOSECONDS,
    ORDER_NUMBER,
    BUY_SELL_INDICATOR,
    QUANTITY,
    ORDERBOOK_ID,
    GROUP,
    PRICE,
];

static ORDER_ADDED_WITH_ATTRIBUTES: &[usize] = &[
    TIMESTAMP_NANOSECONDS,
    ORDER_NUMBER,
    BUY_SELL_INDICATOR,
    QUANTITY,
    ORDERBOOK_ID,
    GROUP,
    PRICE,
    ATTRIBUTION,
    ORDER_TYPE,
];

static ORDER_EXECUTED: &[usize] = &[
    TIMESTAMP_NANOSECONDS,
    ORDER_NUMBER,
    EXECUTED_QUANTITY,
    MATCH_NUMBER,
];

static ORDER_DELETED: &[usize] = &[TIMESTAMP_NANOSECONDS, ORDER_NUMBER];

static ORDER_REPLACED: &[usize] = &[
    TIMESTAMP_NANOSECONDS,
    ORIGINAL_ORDER_NUMBER,
    NEW_ORDER_NUMBER,
    QUANTITY,
    PRICE,
];

fn catalog(message_type: u8) -> Option<&'static [usize]> {
    let message_type = MessageType::try_from(message_type).ok()?;
    Some(match message_type {
        MessageType::TimestampSeconds => TIMESTAMP_SECONDS_MSG,
        MessageType::SystemEvent => SYSTEM_EVENT_MSG,
        MessageType::PriceTickSize => PRICE_TICK_SIZE_MSG,
        MessageType::OrderbookDirectory => ORDERBOOK_DIRECTORY,
        MessageType::TradingState => TRADING_STATE_MSG,
        MessageType::ShortSellingPriceRestriction => SHORT_SELLING_STATE_MSG,
        MessageType::OrderAdded => ORDER_ADDED,
        MessageType::OrderAddedWithAttributes => ORDER_ADDED_WITH_ATTRIBUTES,
        MessageType::OrderExecuted => ORDER_EXECUTED,
        MessageType::OrderDeleted => ORDER_DELETED,
        MessageType::OrderReplaced => ORDER_REPLACED,
    })
}

/// The JNX PTS-ITCH 1.6 feed.
pub static FEED: Feed = Feed {
    name: "jnx-itch-1.6",
    fields: FIELDS,
    catalog,
};
