//! Sadad (Bank Melli) status codes.
//!
//! The status check answers with a numeric `AppStatusCode` and a textual
//! `AppStatusDescription`; a payment is only final when the pair reads
//! `0` / `commit`. Codes below zero are raised locally when the bank breaks
//! its own response contract.

use super::CodeTable;

pub const INVALID_RESPONSE: i64 = -2541;
pub const UNABLE_TO_CONNECT: i64 = -2542;

pub const MESSAGES: CodeTable = &[
    (INVALID_RESPONSE, "پاسخ دریافتی از بانک نامعتبر است"),
    (UNABLE_TO_CONNECT, "امکان برقراری ارتباط با بانک وجود ندارد"),
    (1, "صادر کننده کارت از انجام تراکنش صرف نظر کرد"),
    (3, "پذیرنده فروشگاهی نامعتبر است"),
    (6, "بروز خطای ناشناخته در بانک"),
    (12, "تراکنش نامعتبر است"),
    (13, "مبلغ تراکنش نادرست است"),
    (14, "شماره کارت نامعتبر است"),
    (15, "صادر کننده کارت نامعتبر است"),
    (23, "کارمزد ارسالی پذیرنده غیر قابل قبول است"),
    (33, "تاریخ انقضای کارت سپری شده است"),
    (51, "موجودی کافی نیست"),
    (55, "رمز کارت نامعتبر است"),
    (61, "مبلغ تراکنش بیش از حد مجاز است"),
    (101, "مهلت ارسال تراکنش به پایان رسیده است"),
    (1000, "ترتیب پارامترهای ارسالی اشتباه است"),
    (1001, "پارامترهای پرداخت اشتباه است"),
    (1002, "خطا در سیستم، تراکنش ناموفق"),
    (1003, "آی پی پذیرنده اشتباه است"),
    (1004, "شماره پذیرنده اشتباه است"),
    (1005, "خطای دسترسی، لطفا بعدا تلاش کنید"),
    (1006, "خطا در سیستم"),
    (1011, "درخواست تکراری، شماره سفارش تکراری است"),
    (1012, "اطلاعات پذیرنده صحیح نیست"),
    (1015, "پاسخ خطای نامشخص از سمت مرکز"),
    (1017, "مبلغ درخواستی شما جهت پرداخت از حد مجاز تعریف شده بیشتر است"),
    (1018, "اشکال در تاریخ و زمان سیستم"),
    (1019, "امکان پرداخت از طریق سیستم شتاب برای این پذیرنده امکان پذیر نیست"),
    (1020, "پذیرنده غیرفعال شده است"),
    (1023, "آدرس بازگشت پذیرنده نامعتبر است"),
    (1024, "مهر زمانی پذیرنده نامعتبر است"),
    (1025, "امضا تراکنش نامعتبر است"),
    (1026, "شماره سفارش تراکنش نامعتبر است"),
    (1027, "شماره پذیرنده نامعتبر است"),
    (1028, "شماره ترمینال پذیرنده نامعتبر است"),
    (1029, "آدرس IP پرداخت در محدوده آدرس های معتبر اعلام شده توسط پذیرنده نیست"),
    (1030, "آدرس Domain پرداخت در محدوده آدرس های معتبر اعلام شده توسط پذیرنده نیست"),
    (1031, "مهلت زمانی شما جهت پرداخت به پایان رسیده است"),
    (1032, "پرداخت با این کارت برای پذیرنده مورد نظر امکان پذیر نیست"),
    (1033, "به علت مشکلات در سایت پذیرنده، پرداخت برای این پذیرنده غیرفعال شده است"),
    (1036, "اطلاعات اضافی ارسال نشده یا دارای اشکال است"),
    (1037, "شماره پذیرنده یا شماره ترمینال پذیرنده صحیح نمی باشد"),
    (1053, "خطا: درخواست معتبر، از سمت پذیرنده صورت نگرفته است"),
    (1055, "مقدار غیرمجاز در ورود اطلاعات"),
    (1056, "سیستم موقتا قطع می باشد"),
    (1058, "سرویس پرداخت اینترنتی خارج از سرویس می باشد"),
    (1061, "اشکال در تولید کد یکتا، لطفا مجددا تلاش کنید"),
    (1064, "لطفا مجددا سعی نمایید"),
    (1065, "ارتباط ناموفق بود، لطفا چند لحظه دیگر مجددا سعی کنید"),
    (1066, "سیستم سرویس دهی پرداخت موقتا غیر فعال شده است"),
    (1068, "با عرض پوزش به علت بروزرسانی، سیستم موقتا قطع می باشد"),
    (1072, "خطا در پردازش پارامترهای اختیاری پذیرنده"),
    (1101, "مبلغ تراکنش نامعتبر است"),
    (1103, "توکن ارسالی نامعتبر است"),
    (1104, "اطلاعات تسهیم صحیح نیست"),
];

const STATUS_MESSAGES: &[(&str, &str)] = &[
    ("commit", "تراکنش با موفقیت انجام شد"),
    ("pending", "تراکنش در انتظار تایید نهایی است"),
    ("reversed", "تراکنش برگشت خورده است"),
    ("failed", "تراکنش ناموفق بود"),
    ("canceled", "تراکنش توسط کاربر لغو شد"),
    ("timeout", "مهلت انجام تراکنش به پایان رسیده است"),
    ("invalidrequest", "درخواست ارسالی نامعتبر است"),
    ("notfound", "تراکنش یافت نشد"),
];

/// Looks up a textual status description, case-insensitively.
pub fn status_message(status: &str) -> Option<&'static str> {
    let status = status.trim();
    STATUS_MESSAGES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(status))
        .map(|(_, message)| *message)
}
