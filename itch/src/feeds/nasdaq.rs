//! NASDAQ TotalView-ITCH 5.0 message catalog.
//!
//! Column set and per-type field sequences follow the published TotalView-
//! ITCH 5.0 specification. Every layout starts after the one-byte type tag.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::codec::{field, Codec, FieldDef};
use crate::feed::Feed;

/// Message types carried by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MessageType {
    /// System event message.
    SystemEvent = b'S',
    /// Stock directory.
    StockDirectory = b'R',
    /// Stock trading action.
    StockTradingAction = b'H',
    /// Reg SHO short sale price test restricted indicator.
    RegShoRestriction = b'Y',
    /// Market participant position.
    MarketParticipantPosition = b'L',
    /// Market-wide circuit breaker decline levels.
    MwcbDeclineLevel = b'V',
    /// Market-wide circuit breaker status.
    MwcbStatus = b'W',
    /// IPO quoting period update.
    IpoQuotingPeriodUpdate = b'K',
    /// Limit up/limit down auction collar.
    LuldAuctionCollar = b'J',
    /// Add order, no MPID attribution.
    AddOrder = b'A',
    /// Add order with MPID attribution.
    AddOrderMpid = b'F',
    /// Order executed.
    OrderExecuted = b'E',
    /// Order executed with price.
    OrderExecutedWithPrice = b'C',
    /// Order cancel (partial).
    OrderCancel = b'X',
    /// Order delete.
    OrderDelete = b'D',
    /// Order replace.
    OrderReplace = b'U',
    /// Trade, non-cross.
    Trade = b'P',
    /// Cross trade.
    CrossTrade = b'Q',
    /// Broken trade.
    BrokenTrade = b'B',
    /// Net order imbalance indicator.
    NetOrderImbalance = b'I',
    /// Retail price improvement indicator.
    RetailPriceImprovement = b'N',
}

/// Column indices into [`FIELDS`], one per message field, alphabetical.
pub mod col {
    pub const ATTRIBUTION: usize = 0;
    pub const AUCTION_COLLAR_EXTENSION: usize = 1;
    pub const AUCTION_COLLAR_REFERENCE_PRICE: usize = 2;
    pub const AUTHENTICITY: usize = 3;
    pub const BREACHED_LEVEL: usize = 4;
    pub const BUY_SELL_INDICATOR: usize = 5;
    pub const CANCELED_SHARES: usize = 6;
    pub const CROSS_PRICE: usize = 7;
    pub const CROSS_SHARES: usize = 8;
    pub const CROSS_TYPE: usize = 9;
    pub const CURRENT_REFERENCE_PRICE: usize = 10;
    pub const ETP_FLAG: usize = 11;
    pub const ETP_LEVERAGE_FACTOR: usize = 12;
    pub const EVENT_CODE: usize = 13;
    pub const EXECUTED_SHARES: usize = 14;
    pub const EXECUTION_PRICE: usize = 15;
    pub const FAR_PRICE: usize = 16;
    pub const FINANCIAL_STATUS_INDICATOR: usize = 17;
    pub const IMBALANCE_DIRECTION: usize = 18;
    pub const IMBALANCE_SHARES: usize = 19;
    pub const INTEREST_FLAG: usize = 20;
    pub const INVERSE_INDICATOR: usize = 21;
    pub const IPO_FLAG: usize = 22;
    pub const IPO_PRICE: usize = 23;
    pub const IPO_QUOTATION_RELEASE_QUALIFIER: usize = 24;
    pub const IPO_QUOTATION_RELEASE_TIME: usize = 25;
    pub const ISSUE_CLASSIFICATION: usize = 26;
    pub const ISSUE_SUB_TYPE: usize = 27;
    pub const LEVEL_1: usize = 28;
    pub const LEVEL_2: usize = 29;
    pub const LEVEL_3: usize = 30;
    pub const LOCATE_CODE: usize = 31;
    pub const LOWER_AUCTION_COLLAR_PRICE: usize = 32;
    pub const LULD_REFERENCE_PRICE_TIER: usize = 33;
    pub const MARKET_CATEGORY: usize = 34;
    pub const MARKET_MAKER_MODE: usize = 35;
    pub const MARKET_PARTICIPANT_STATE: usize = 36;
    pub const MATCH_NUMBER: usize = 37;
    pub const MPID: usize = 38;
    pub const NEAR_PRICE: usize = 39;
    pub const NEW_ORDER_REFERENCE_NUMBER: usize = 40;
    pub const ORDER_REFERENCE_NUMBER: usize = 41;
    pub const ORIGINAL_ORDER_REFERENCE_NUMBER: usize = 42;
    pub const PAIRED_SHARES: usize = 43;
    pub const PRICE: usize = 44;
    pub const PRICE_VARIATION_INDICATOR: usize = 45;
    pub const PRIMARY_MARKET_MAKER: usize = 46;
    pub const PRINTABLE: usize = 47;
    pub const REASON: usize = 48;
    pub const REG_SHO_ACTION: usize = 49;
    pub const RESERVED: usize = 50;
    pub const ROUND_LOT_SIZE: usize = 51;
    pub const ROUND_LOTS_ONLY: usize = 52;
    pub const SHARES: usize = 53;
    pub const SHORT_SALE_THRESHOLD_INDICATOR: usize = 54;
    pub const STOCK: usize = 55;
    pub const STOCK_LOCATE: usize = 56;
    pub const TIMESTAMP: usize = 57;
    pub const TRACKING_NUMBER: usize = 58;
    pub const TRADING_STATE: usize = 59;
    pub const UPPER_AUCTION_COLLAR_PRICE: usize = 60;
}

/// Union of message-field columns across the catalog, alphabetical.
pub static FIELDS: &[FieldDef] = &[
    field("attribution", Codec::Ascii(4)),
    field("auction_collar_extension", Codec::U32),
    field("auction_collar_reference_price", Codec::U32),
    field("authenticity", Codec::Char),
    field("breached_level", Codec::Char),
    field("buy_sell_indicator", Codec::Char),
    field("canceled_shares", Codec::U32),
    field("cross_price", Codec::U32),
    field("cross_shares", Codec::U64),
    field("cross_type", Codec::Char),
    field("current_reference_price", Codec::U32),
    field("etp_flag", Codec::Char),
    field("etp_leverage_factor", Codec::U32),
    field("event_code", Codec::Char),
    field("executed_shares", Codec::U32),
    field("execution_price", Codec::U32),
    field("far_price", Codec::U32),
    field("financial_status_indicator", Codec::Char),
    field("imbalance_direction", Codec::Char),
    field("imbalance_shares", Codec::U64),
    field("interest_flag", Codec::Char),
    field("inverse_indicator", Codec::Char),
    field("ipo_flag", Codec::Char),
    field("ipo_price", Codec::U32),
    field("ipo_quotation_release_qualifier", Codec::Char),
    field("ipo_quotation_release_time", Codec::U32),
    field("issue_classification", Codec::Char),
    field("issue_sub_type", Codec::Ascii(2)),
    field("level_1", Codec::U64),
    field("level_2", Codec::U64),
    field("level_3", Codec::U64),
    field("locate_code", Codec::U16),
    field("lower_auction_collar_price", Codec::U32),
    field("luld_reference_price_tier", Codec::Char),
    field("market_category", Codec::Char),
    field("market_maker_mode", Codec::Char),
    field("market_participant_state", Codec::Char),
    field("match_number", Codec::U64),
    field("mpid", Codec::Ascii(4)),
    field("near_price", Codec::U32),
    field("new_order_reference_number", Codec::U64),
    field("order_reference_number", Codec::U64),
    field("original_order_reference_number", Codec::U64),
    field("paired_shares", Codec::U64),
    field("price", Codec::U32),
    field("price_variation_indicator", Codec::Char),
    field("primary_market_maker", Codec::Char),
    field("printable", Codec::Char),
    field("reason", Codec::Ascii(4)),
    field("reg_sho_action", Codec::Char),
    field("reserved", Codec::Char),
    field("round_lot_size", Codec::U32),
    field("round_lots_only", Codec::Char),
    field("shares", Codec::U32),
    field("short_sale_threshold_indicator", Codec::Char),
    field("stock", Codec::Ascii(8)),
    field("stock_locate", Codec::U16),
    field("timestamp", Codec::U48),
    field("tracking_number", Codec::U16),
    field("trading_state", Codec::Char),
    field("upper_auction_collar_price", Codec::U32),
];

use col::*;

static SYSTEM_EVENT: &[usize] = &[STOCK_LOCATE, TRACKING_NUMBER, TIMESTAMP, EVENT_CODE];

static STOCK_DIRECTORY: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    STOCK,
    MARKET_CATEGORY,
    FINANCIAL_STATUS_INDICATOR,
    ROUND_LOT_SIZE,
    ROUND_LOTS_ONLY,
    ISSUE_CLASSIFICATION,
    ISSUE_SUB_TYPE,
    AUTHENTICITY,
    SHORT_SALE_THRESHOLD_INDICATOR,
    IPO_FLAG,
    LULD_REFERENCE_PRICE_TIER,
    ETP_FLAG,
    ETP_LEVERAGE_FACTOR,
    INVERSE_INDICATOR,
];

static STOCK_TRADING_ACTION: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    STOCK,
    TRADING_STATE,
    RESERVED,
    REASON,
];

// The one layout keyed by locate_code instead of stock_locate.
static REG_SHO_RESTRICTION: &[usize] =
    &[LOCATE_CODE, TRACKING_NUMBER, TIMESTAMP, STOCK, REG_SHO_ACTION];

static MARKET_PARTICIPANT_POSITION: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    MPID,
    STOCK,
    PRIMARY_MARKET_MAKER,
    MARKET_MAKER_MODE,
    MARKET_PARTICIPANT_STATE,
];

static MWCB_DECLINE_LEVEL: &[usize] =
    &[STOCK_LOCATE, TRACKING_NUMBER, TIMESTAMP, LEVEL_1, LEVEL_2, LEVEL_3];

static MWCB_STATUS: &[usize] = &[STOCK_LOCATE, TRACKING_NUMBER, TIMESTAMP, BREACHED_LEVEL];

static IPO_QUOTING_PERIOD_UPDATE: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    STOCK,
    IPO_QUOTATION_RELEASE_TIME,
    IPO_QUOTATION_RELEASE_QUALIFIER,
    IPO_PRICE,
];

static LULD_AUCTION_COLLAR: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    STOCK,
    AUCTION_COLLAR_REFERENCE_PRICE,
    UPPER_AUCTION_COLLAR_PRICE,
    LOWER_AUCTION_COLLAR_PRICE,
    AUCTION_COLLAR_EXTENSION,
];

static ADD_ORDER: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    ORDER_REFERENCE_NUMBER,
    BUY_SELL_INDICATOR,
    SHARES,
    STOCK,
    PRICE,
];

static ADD_ORDER_MPID: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    ORDER_REFERENCE_NUMBER,
    BUY_SELL_INDICATOR,
    SHARES,
    STOCK,
    PRICE,
    ATTRIBUTION,
];

static ORDER_EXECUTED: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    ORDER_REFERENCE_NUMBER,
    EXECUTED_SHARES,
    MATCH_NUMBER,
];

static ORDER_EXECUTED_WITH_PRICE: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    ORDER_REFERENCE_NUMBER,
    EXECUTED_SHARES,
    MATCH_NUMBER,
    PRINTABLE,
    EXECUTION_PRICE,
];

static ORDER_CANCEL: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    ORDER_REFERENCE_NUMBER,
    CANCELED_SHARES,
];

static ORDER_DELETE: &[usize] =
    &[STOCK_LOCATE, TRACKING_NUMBER, TIMESTAMP, ORDER_REFERENCE_NUMBER];

static ORDER_REPLACE: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    ORIGINAL_ORDER_REFERENCE_NUMBER,
    NEW_ORDER_REFERENCE_NUMBER,
    SHARES,
    PRICE,
];

static TRADE: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    ORDER_REFERENCE_NUMBER,
    BUY_SELL_INDICATOR,
    SHARES,
    STOCK,
    PRICE,
    MATCH_NUMBER,
];

static CROSS_TRADE: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    CROSS_SHARES,
    STOCK,
    CROSS_PRICE,
    MATCH_NUMBER,
    CROSS_TYPE,
];

static BROKEN_TRADE: &[usize] = &[STOCK_LOCATE, TRACKING_NUMBER, TIMESTAMP, MATCH_NUMBER];

static NET_ORDER_IMBALANCE: &[usize] = &[
    STOCK_LOCATE,
    TRACKING_NUMBER,
    TIMESTAMP,
    PAIRED_SHARES,
    IMBALANCE_SHARES,
    IMBALANCE_DIRECTION,
    STOCK,
    FAR_PRICE,
    NEAR_PRICE,
    CURRENT_REFERENCE_PRICE,
    CROSS_TYPE,
    PRICE_VARIATION_INDICATOR,
];

static RETAIL_PRICE_IMPROVEMENT: &[usize] =
    &[STOCK_LOCATE, TRACKING_NUMBER, TIMESTAMP, STOCK, INTEREST_FLAG];

fn catalog(message_type: u8) -> Option<&'static [usize]> {
    let message_type = MessageType::try_from(message_type).ok()?;
    Some(match message_type {
        MessageType::SystemEvent => SYSTEM_EVENT,
        MessageType::StockDirectory => STOCK_DIRECTORY,
        MessageType::StockTradingAction => STOCK_TRADING_ACTION,
        MessageType::RegShoRestriction => REG_SHO_RESTRICTION,
        MessageType::MarketParticipantPosition => MARKET_PARTICIPANT_POSITION,
        MessageType::MwcbDeclineLevel => MWCB_DECLINE_LEVEL,
        MessageType::MwcbStatus => MWCB_STATUS,
        MessageType::IpoQuotingPeriodUpdate => IPO_QUOTING_PERIOD_UPDATE,
        MessageType::LuldAuctionCollar => LULD_AUCTION_COLLAR,
        MessageType::AddOrder => ADD_ORDER,
        MessageType::AddOrderMpid => ADD_ORDER_MPID,
        MessageType::OrderExecuted => ORDER_EXECUTED,
        MessageType::OrderExecutedWithPrice => ORDER_EXECUTED_WITH_PRICE,
        MessageType::OrderCancel => ORDER_CANCEL,
        MessageType::OrderDelete => ORDER_DELETE,
        MessageType::OrderReplace => ORDER_REPLACE,
        MessageType::Trade => TRADE,
        MessageType::CrossTrade => CROSS_TRADE,
        MessageType::BrokenTrade => BROKEN_TRADE,
        MessageType::NetOrderImbalance => NET_ORDER_IMBALANCE,
        MessageType::RetailPriceImprovement => RETAIL_PRICE_IMPROVEMENT,
    })
}

/// The NASDAQ TotalView-ITCH 5.0 feed.
pub static FEED: Feed = Feed {
    name: "nasdaq-itch-5.0",
    fields: FIELDS,
    catalog,
};
