//! Synthetic GRIB messages for tests.
//!
//! Messages have a valid section layout but carry no packed data.

fn put_u16(buf: &mut [u8], at: usize, v: u16) {
    buf[at..at + 2].copy_from_slice(&v.to_be_bytes());
}

fn put_u24(buf: &mut [u8], at: usize, v: u32) {
    buf[at..at + 3].copy_from_slice(&v.to_be_bytes()[1..]);
}

fn put_u32(buf: &mut [u8], at: usize, v: u32) {
    buf[at..at + 4].copy_from_slice(&v.to_be_bytes());
}

fn sm24(v: i32) -> u32 {
    if v < 0 { v.unsigned_abs() | 0x80_0000 } else { v as u32 }
}

fn sm32(v: i64) -> u32 {
    if v < 0 { v.unsigned_abs() as u32 | 0x8000_0000 } else { v as u32 }
}

/// A single-field GRIB1 message on a lat/lon grid (millidegrees).
#[derive(Debug, Clone)]
pub struct Grib1Message {
    pub level_type: u8,
    pub time_unit: u8,
    pub p1: u8,
    pub p2: u8,
    pub time_range: u8,
    pub representation: u8,
    pub ni: u16,
    pub nj: u16,
    pub lat_first: i32,
    pub lon_first: i32,
    pub lat_last: i32,
    pub lon_last: i32,
    pub di: u16,
    pub dj: u16,
    pub scanning_mode: u8,
    /// Encode the length with the ECMWF large-message convention
    pub large: bool,
    /// Add a bitmap section masking the last grid point
    pub bitmap: bool,
}

impl Default for Grib1Message {
    /// ERA5-LAND style accumulation at step 1 on a 3 x 2 grid.
    fn default() -> Self {
        Self {
            level_type: 1,
            time_unit: 1,
            p1: 0,
            p2: 1,
            time_range: 4,
            representation: 0,
            ni: 3,
            nj: 2,
            lat_first: 56_500,
            lon_first: -3_200,
            lat_last: 56_400,
            lon_last: -3_000,
            di: 100,
            dj: 100,
            scanning_mode: 0,
            large: false,
            bitmap: false,
        }
    }
}

impl Grib1Message {
    pub fn pds(&self) -> Vec<u8> {
        let mut pds = vec![0u8; 28];
        put_u24(&mut pds, 0, 28);
        pds[3] = 128; // table version
        pds[4] = 98; // ECMWF
        pds[6] = 255;
        pds[7] = if self.bitmap { 0xC0 } else { 0x80 }; // GDS present, bitmap flag
        pds[8] = 228; // total precipitation
        pds[9] = self.level_type;
        pds[12] = 79;
        pds[13] = 1;
        pds[14] = 1;
        pds[17] = self.time_unit;
        pds[18] = self.p1;
        pds[19] = self.p2;
        pds[20] = self.time_range;
        pds[24] = 20;
        pds
    }

    pub fn gds(&self) -> Vec<u8> {
        let mut gds = vec![0u8; 32];
        put_u24(&mut gds, 0, 32);
        gds[4] = 255;
        gds[5] = self.representation;
        put_u16(&mut gds, 6, self.ni);
        put_u16(&mut gds, 8, self.nj);
        put_u24(&mut gds, 10, sm24(self.lat_first));
        put_u24(&mut gds, 13, sm24(self.lon_first));
        gds[16] = 0x80;
        put_u24(&mut gds, 17, sm24(self.lat_last));
        put_u24(&mut gds, 20, sm24(self.lon_last));
        put_u16(&mut gds, 23, self.di);
        put_u16(&mut gds, 25, self.dj);
        gds[27] = self.scanning_mode;
        gds
    }

    fn bms(&self) -> Vec<u8> {
        if !self.bitmap {
            return Vec::new();
        }
        let points = self.ni as usize * self.nj as usize;
        let bytes = points.div_ceil(8);
        let mut bms = vec![0xFFu8; 6 + bytes];
        let bms_len = bms.len() as u32;
        put_u24(&mut bms, 0, bms_len);
        bms[3] = (bytes * 8 - points) as u8; // unused bits at the end
        put_u16(&mut bms, 4, 0); // bitmap follows
        // Last point is missing (sea)
        let last = points - 1;
        bms[6 + last / 8] &= !(0x80 >> (last % 8));
        bms
    }

    pub fn encode(&self) -> Vec<u8> {
        let pds = self.pds();
        let gds = self.gds();
        let bms = self.bms();
        let header = 8 + pds.len() + gds.len() + bms.len();

        // Large messages: length field = 2 (x120), BDS length field = 12
        let (total_field, bds_len) = if self.large {
            let total = 2 * 120 - 12 + 4;
            (0x80_0000 | 2, total - header - 4)
        } else {
            (header + 12 + 4, 12)
        };

        let mut bds = vec![0u8; bds_len];
        put_u24(&mut bds, 0, 12);

        let mut msg = Vec::new();
        msg.extend_from_slice(b"GRIB");
        msg.extend_from_slice(&(total_field as u32).to_be_bytes()[1..]);
        msg.push(1);
        msg.extend_from_slice(&pds);
        msg.extend_from_slice(&gds);
        msg.extend_from_slice(&bms);
        msg.extend_from_slice(&bds);
        msg.extend_from_slice(b"7777");
        msg
    }
}

/// One product (Sections 4 to 7) inside a GRIB2 message.
#[derive(Debug, Clone)]
pub struct Grib2Field {
    pub template: u16,
    pub level_type: u8,
    pub time_unit: u8,
    pub forecast_time: i64,
    pub range_unit: u8,
    pub range_length: u32,
}

impl Default for Grib2Field {
    fn default() -> Self {
        Self {
            template: 0,
            level_type: 1,
            time_unit: 1,
            forecast_time: 1,
            range_unit: 1,
            range_length: 0,
        }
    }
}

impl Grib2Field {
    fn section4(&self) -> Vec<u8> {
        let len = match self.template {
            1 => 37,
            8 => 58,
            11 => 61,
            _ => 34,
        };
        let mut s = vec![0u8; len];
        put_u32(&mut s, 0, len as u32);
        s[4] = 4;
        put_u16(&mut s, 7, self.template);
        s[11] = 2;
        s[17] = self.time_unit;
        put_u32(&mut s, 18, sm32(self.forecast_time));
        s[22] = self.level_type;
        s[28] = 255;
        let range_at = match self.template {
            8 => Some(48),
            11 => Some(51),
            _ => None,
        };
        if let Some(at) = range_at {
            s[at - 7] = 1; // number of time ranges
            s[at] = self.range_unit;
            put_u32(&mut s, at + 1, self.range_length);
        }
        s
    }

    fn data_sections(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.section4());

        let mut s5 = vec![0u8; 21];
        put_u32(&mut s5, 0, 21);
        s5[4] = 5;
        out.extend_from_slice(&s5);

        out.extend_from_slice(&[0, 0, 0, 6, 6, 255]);
        out.extend_from_slice(&[0, 0, 0, 5, 7]);
        out
    }
}

/// A GRIB2 message: one grid definition shared by one or more fields.
#[derive(Debug, Clone)]
pub struct Grib2Message {
    pub grid_template: u16,
    pub ni: u32,
    pub nj: u32,
    pub lat_first: i64,
    pub lon_first: i64,
    pub lat_last: i64,
    pub lon_last: i64,
    pub di: u32,
    pub dj: u32,
    pub scanning_mode: u8,
    pub fields: Vec<Grib2Field>,
}

impl Default for Grib2Message {
    fn default() -> Self {
        Self {
            grid_template: 0,
            ni: 3,
            nj: 2,
            lat_first: 56_500_000,
            lon_first: 356_800_000,
            lat_last: 56_400_000,
            lon_last: 357_000_000,
            di: 100_000,
            dj: 100_000,
            scanning_mode: 0,
            fields: vec![Grib2Field::default()],
        }
    }
}

impl Grib2Message {
    fn section3(&self) -> Vec<u8> {
        let mut s = vec![0u8; 72];
        put_u32(&mut s, 0, 72);
        s[4] = 3;
        put_u32(&mut s, 6, self.ni * self.nj);
        put_u16(&mut s, 12, self.grid_template);
        let t = 14;
        s[t] = 6;
        put_u32(&mut s, t + 16, self.ni);
        put_u32(&mut s, t + 20, self.nj);
        put_u32(&mut s, t + 28, u32::MAX);
        put_u32(&mut s, t + 32, sm32(self.lat_first));
        put_u32(&mut s, t + 36, sm32(self.lon_first));
        s[t + 40] = 0x30;
        put_u32(&mut s, t + 41, sm32(self.lat_last));
        put_u32(&mut s, t + 45, sm32(self.lon_last));
        put_u32(&mut s, t + 49, self.di);
        put_u32(&mut s, t + 53, self.dj);
        s[t + 57] = self.scanning_mode;
        s
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::new();
        let mut s1 = vec![0u8; 21];
        put_u32(&mut s1, 0, 21);
        s1[4] = 1;
        body.extend_from_slice(&s1);
        body.extend_from_slice(&self.section3());
        for field in &self.fields {
            body.extend_from_slice(&field.data_sections());
        }

        let total = 16 + body.len() + 4;
        let mut msg = Vec::with_capacity(total);
        msg.extend_from_slice(b"GRIB");
        msg.extend_from_slice(&[0, 0, 0, 2]);
        msg.extend_from_slice(&(total as u64).to_be_bytes());
        msg.extend_from_slice(&body);
        msg.extend_from_slice(b"7777");
        msg
    }
}
