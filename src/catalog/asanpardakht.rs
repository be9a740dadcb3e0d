//! Asanpardakht status codes.
//!
//! The bank reuses this space for every step: ISO-style card responses below
//! 100, request validation in the 3xx range, verification in 5xx and
//! reconciliation in 6xx. `500` and `600` are the two success statuses of the
//! settlement sequence and never reach the caller as errors.

use super::CodeTable;

pub const VERIFIED: i64 = 500;
pub const RECONCILED: i64 = 600;

pub const MESSAGES: CodeTable = &[
    (1, "صادرکننده کارت از انجام تراکنش صرف نظر کرد"),
    (2, "عملیات تاییدیه این تراکنش قبلا با موفقیت صورت پذیرفته است"),
    (3, "پذیرنده فروشگاهی نامعتبر می باشد"),
    (4, "کارت توسط دستگاه ضبط شود"),
    (5, "به تراکنش رسیدگی نشد"),
    (6, "بروز خطا"),
    (7, "به دلیل شرایط خاص کارت توسط دستگاه ضبط شود"),
    (8, "با تشخیص هویت دارنده کارت، تراکنش موفق می باشد"),
    (12, "تراکنش نامعتبر است"),
    (13, "مبلغ تراکنش اصلاحیه نادرست است"),
    (14, "شماره کارت ارسالی نامعتبر است"),
    (15, "صادرکننده کارت نامعتبر است"),
    (16, "تراکنش مورد تایید است و اطلاعات شیار سوم کارت به روز رسانی شود"),
    (19, "تراکنش مجددا ارسال شود"),
    (23, "کارمزد ارسالی پذیرنده غیر قابل قبول است"),
    (25, "تراکنش اصلی یافت نشد"),
    (30, "قالب پیام دارای اشکال است"),
    (31, "پذیرنده توسط سوئیچ پشتیبانی نمی شود"),
    (33, "تاریخ انقضای کارت سپری شده است"),
    (34, "تراکنش اصلی با موفقیت انجام نپذیرفته است"),
    (36, "کارت محدود شده است"),
    (38, "تعداد دفعات ورود گذرواژه بیش از حد مجاز است"),
    (39, "کارت حساب اعتباری ندارد"),
    (40, "عملیات درخواستی پشتیبانی نمی گردد"),
    (41, "کارت مفقودی می باشد"),
    (43, "کارت مسروقه می باشد"),
    (51, "موجودی کافی نمی باشد"),
    (54, "تاریخ انقضای کارت سپری شده است"),
    (55, "گذرواژه کارت نامعتبر است"),
    (56, "کارت نامعتبر است"),
    (57, "انجام تراکنش مربوطه توسط دارنده کارت مجاز نمی باشد"),
    (58, "انجام تراکنش مربوطه توسط پایانه انجام دهنده مجاز نمی باشد"),
    (61, "مبلغ برداشت وجه بیش از حد مجاز است"),
    (62, "کارت محدود شده است"),
    (63, "تمهیدات امنیتی نقض گردیده است"),
    (65, "تعداد درخواست تراکنش بیش از حد مجاز است"),
    (75, "تعداد دفعات ورود گذرواژه بیش از حد مجاز است"),
    (77, "روز مالی تراکنش نامعتبر است"),
    (78, "کارت فعال نیست"),
    (79, "حساب متصل به کارت نامعتبر است یا دارای اشکال است"),
    (80, "تراکنش موفق عمل نکرده است"),
    (84, "بانک صادرکننده کارت پاسخ نمی دهد"),
    (86, "موسسه ارسال کننده، شاپرک یا مقصد تراکنش در حالت Sign off است"),
    (90, "بانک صادرکننده کارت درحال انجام عملیات پایان روز می باشد"),
    (92, "مسیری برای ارسال تراکنش به مقصد یافت نشد"),
    (94, "تراکنش تکراری است"),
    (96, "بروز خطای سیستمی در انجام تراکنش"),
    (97, "فرایند تغییر کلید برای صادر کننده یا پذیرنده در حال انجام است"),
    (100, "پاسخ نامعتبر از بانک"),
    (200, "کاربر از انجام تراکنش منصرف شده است"),
    (300, "خطای نامشخص در پردازش درخواست"),
    (301, "پیکربندی پذیرنده اینترنتی نامعتبر است"),
    (302, "کلیدهای رمزنگاری نامعتبر هستند"),
    (303, "رمزنگاری نامعتبر است"),
    (304, "تعداد عناصر درخواست نامعتبر است"),
    (305, "نام کاربری یا رمز عبور پذیرنده نامعتبر است"),
    (306, "با آسان پرداخت تماس بگیرید"),
    (307, "سرور پذیرنده نامعتبر است"),
    (308, "شماره فاکتور یا شماره سفارش تکراری است"),
    (309, "این تراکنش پیش از این با موفقیت انجام شده است"),
    (310, "آدرس بازگشت نامعتبر است"),
    (311, "مبلغ تراکنش نامعتبر است"),
    (312, "تاریخ و زمان تراکنش نامعتبر است"),
    (313, "آدرس آی پی پذیرنده نامعتبر است"),
    (400, "کد تراکنش درگاه نامعتبر است"),
    (401, "تراکنش یافت نشد"),
    (501, "پردازش درخواست امکان پذیر نیست"),
    (502, "تراکنش یافت نشد"),
    (503, "تراکنش قبلا بازبینی شده است"),
    (504, "تراکنش قبلا تسویه شده است"),
    (505, "تراکنش تسویه نشده و در انتظار تسویه است"),
    (506, "تراکنش از طرف کاربر لغو شده است"),
    (507, "تراکنش با خطا مواجه شده است"),
    (601, "درخواست تسویه امکان پذیر نیست"),
    (602, "تراکنش برای تسویه یافت نشد"),
    (603, "تراکنش تسویه نشده و بازبینی نشده است"),
    (604, "تراکنش قبلا تسویه شده است"),
    (605, "تراکنش بازبینی نشده است"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_success_codes_are_not_error_entries() {
        assert!(!MESSAGES.iter().any(|(code, _)| *code == VERIFIED || *code == RECONCILED));
    }
}
