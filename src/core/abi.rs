use sha3::{Digest, Keccak256};
use std::fmt;

/// Size of one ABI word
const WORD: usize = 32;

/// Escrow contract function signatures
pub const GET_PROJECTS_BY_ADDRESS: &str = "getProjectsByAddress(address)";
pub const GET_PROJECTS_FOR_FREELANCER: &str = "getProjectsForFreelancer(address)";
pub const CREATE_PROJECT: &str = "createProject(string,string,uint256,uint256)";
pub const REMOVE_PROJECT: &str = "removeProject(uint256)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    InvalidHex(String),
    InvalidAddress(String),
    OutOfBounds { offset: usize, len: usize },
    ValueTooLarge(&'static str),
    InvalidUtf8,
}

impl fmt::Display for AbiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiError::InvalidHex(msg) => write!(f, "Invalid hex data: {}", msg),
            AbiError::InvalidAddress(addr) => write!(f, "Invalid address: {}", addr),
            AbiError::OutOfBounds { offset, len } => {
                write!(f, "Read past end of data: offset {} with length {}", offset, len)
            }
            AbiError::ValueTooLarge(ty) => write!(f, "Value does not fit into {}", ty),
            AbiError::InvalidUtf8 => write!(f, "String is not valid UTF-8"),
        }
    }
}

/// Project tuple as returned by the contract read calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProject {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub status: u64,
    pub project_fee: u128,
}

/// Call argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address([u8; 20]),
    Uint(u128),
    String(String),
}

/// First four bytes of keccak256(signature)
pub fn selector(signature: &str) -> [u8; 4] {
    let mut hasher = Keccak256::new();
    hasher.update(signature.as_bytes());
    let hash = hasher.finalize();
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Encode calldata: selector followed by the head/tail encoded arguments.
pub fn encode_call(selector: [u8; 4], tokens: &[Token]) -> Vec<u8> {
    let head_size = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::Address(addr) => {
                let mut word = [0u8; WORD];
                word[12..].copy_from_slice(addr);
                head.extend_from_slice(&word);
            }
            Token::Uint(value) => head.extend_from_slice(&uint_word(*value)),
            Token::String(s) => {
                head.extend_from_slice(&uint_word((head_size + tail.len()) as u128));
                tail.extend_from_slice(&uint_word(s.len() as u128));
                tail.extend_from_slice(s.as_bytes());
                let padding = (WORD - s.len() % WORD) % WORD;
                tail.extend(std::iter::repeat(0u8).take(padding));
            }
        }
    }

    let mut data = Vec::with_capacity(4 + head.len() + tail.len());
    data.extend_from_slice(&selector);
    data.extend_from_slice(&head);
    data.extend_from_slice(&tail);
    data
}

fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Parse a `0x`-prefixed 20 byte address
pub fn parse_address(address: &str) -> Result<[u8; 20], AbiError> {
    let bytes = from_hex_prefixed(address)
        .map_err(|_| AbiError::InvalidAddress(address.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| AbiError::InvalidAddress(address.to_string()))
}

pub fn to_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn from_hex_prefixed(value: &str) -> Result<Vec<u8>, AbiError> {
    let stripped = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    hex::decode(stripped).map_err(|e| AbiError::InvalidHex(e.to_string()))
}

/// Decode the return data of `getProjectsByAddress` / `getProjectsForFreelancer`:
/// a dynamic array of `(uint256, string, string, uint8, uint256)` tuples.
pub fn decode_projects(data: &[u8]) -> Result<Vec<RawProject>, AbiError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let array_start = read_offset(data, 0)?;
    let count = read_offset(data, array_start)?;
    let items_start = array_start.saturating_add(WORD);

    let mut projects = Vec::with_capacity(count.min(data.len() / WORD));
    for index in 0..count {
        let tuple_start = items_start
            .saturating_add(read_offset(data, items_start.saturating_add(index * WORD))?);
        projects.push(decode_project(data, tuple_start)?);
    }
    Ok(projects)
}

fn decode_project(data: &[u8], start: usize) -> Result<RawProject, AbiError> {
    let id = read_u64(data, start)?;
    let name = read_string(data, start.saturating_add(read_offset(data, start + WORD)?))?;
    let description =
        read_string(data, start.saturating_add(read_offset(data, start + 2 * WORD)?))?;
    let status = read_u64(data, start + 3 * WORD)?;
    let project_fee = read_u128(data, start + 4 * WORD)?;

    Ok(RawProject {
        id,
        name,
        description,
        status,
        project_fee,
    })
}

fn read_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8], AbiError> {
    let end = offset
        .checked_add(len)
        .ok_or(AbiError::OutOfBounds { offset, len })?;
    data.get(offset..end)
        .ok_or(AbiError::OutOfBounds { offset, len })
}

fn read_u128(data: &[u8], offset: usize) -> Result<u128, AbiError> {
    let word = read_slice(data, offset, WORD)?;
    if word[..16].iter().any(|b| *b != 0) {
        return Err(AbiError::ValueTooLarge("u128"));
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(low))
}

fn read_u64(data: &[u8], offset: usize) -> Result<u64, AbiError> {
    u64::try_from(read_u128(data, offset)?).map_err(|_| AbiError::ValueTooLarge("u64"))
}

fn read_offset(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    usize::try_from(read_u64(data, offset)?).map_err(|_| AbiError::ValueTooLarge("usize"))
}

fn read_string(data: &[u8], offset: usize) -> Result<String, AbiError> {
    let len = read_offset(data, offset)?;
    let bytes = read_slice(data, offset.saturating_add(WORD), len)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8)
}
