// 用户错误
// 11xxx
pub const USER_NOT_FOUND: u32 = 11001;
pub const USER_ALREADY_EXISTS: u32 = 11002;
pub const INVALID_CREDENTIALS: u32 = 11003;

// token错误
// 12xxx
pub const INVALID_TOKEN: u32 = 12001;
pub const TOKEN_EXPIRED: u32 = 12002;
pub const MISSING_TOKEN: u32 = 12003;
pub const TOKEN_CREATION_ERROR: u32 = 12004;
pub const TOKEN_REVOKED: u32 = 12005;

// db错误
// 13xxx
pub const SOMETHING_WENT_WRONG: u32 = 13001;
pub const UNIQUE_CONSTRAINT_VIOLATION: u32 = 13002;

// 谱面错误
// 14xxx
pub const CHART_NOT_FOUND: u32 = 14001;
pub const MUSIC_ID_TAKEN: u32 = 14002;
pub const INVALID_NOTE: u32 = 14003;
pub const NOT_CHART_CREATOR: u32 = 14004;

// 成绩错误
// 15xxx
pub const RESULT_NOT_FOUND: u32 = 15001;
pub const LETTER_RANK_MISMATCH: u32 = 15002;

// request错误
// 20xxx
pub const VALIDATION_ERROR: u32 = 20001;
pub const JSON_REJECTION: u32 = 20002;
